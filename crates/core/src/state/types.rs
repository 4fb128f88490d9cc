//! Types for the state store.

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur reading or writing persisted state.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("Failed to read state file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write state file {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Trait for last-seen identifier storage.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// The last saved identifier, `None` if nothing was ever saved.
    async fn read(&self) -> Result<Option<String>, StateError>;

    /// Replace the saved identifier.
    async fn write(&self, id: &str) -> Result<(), StateError>;
}
