//! Persistence of the last processed filing identifier.

mod file_store;
mod types;

pub use file_store::FileStateStore;
pub use types::*;
