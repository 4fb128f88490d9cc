//! Filing watcher.
//!
//! Runs one check-and-notify cycle: read the last seen id, search, compare,
//! fetch, send, persist. Each step is awaited before the next begins.

mod runner;
mod types;

pub use runner::FilingWatcher;
pub use types::*;
