//! Single-file state store.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use super::{StateError, StateStore};

/// Stores the identifier as the whole content of one file.
///
/// There is no locking: two processes sharing the file can race, so only one
/// instance should run at a time.
pub struct FileStateStore {
    path: PathBuf,
}

impl FileStateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl StateStore for FileStateStore {
    async fn read(&self) -> Result<Option<String>, StateError> {
        match fs::read_to_string(&self.path).await {
            Ok(contents) => {
                let id = contents.trim();
                Ok((!id.is_empty()).then(|| id.to_string()))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No state file yet");
                Ok(None)
            }
            Err(source) => Err(StateError::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }

    async fn write(&self, id: &str) -> Result<(), StateError> {
        fs::write(&self.path, id)
            .await
            .map_err(|source| StateError::Write {
                path: self.path.clone(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_then_read_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = FileStateStore::new(dir.path().join("last_report_id"));

        store.write("999").await.unwrap();
        assert_eq!(store.read().await.unwrap().as_deref(), Some("999"));
    }

    #[tokio::test]
    async fn test_read_missing_file_is_none() {
        let dir = TempDir::new().unwrap();
        let store = FileStateStore::new(dir.path().join("never_written"));
        assert!(store.read().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_write_stores_exactly_the_identifier() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("last_report_id");
        let store = FileStateStore::new(&path);

        store.write("20026545").await.unwrap();
        store.write("20026600").await.unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "20026600");
    }

    #[tokio::test]
    async fn test_read_trims_whitespace() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("last_report_id");
        std::fs::write(&path, "123\n").unwrap();

        let store = FileStateStore::new(&path);
        assert_eq!(store.read().await.unwrap().as_deref(), Some("123"));
    }

    #[tokio::test]
    async fn test_read_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        let store = FileStateStore::new(dir.path());
        assert!(matches!(store.read().await, Err(StateError::Read { .. })));
    }

    #[tokio::test]
    async fn test_write_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let store = FileStateStore::new(dir.path().join("missing").join("last_report_id"));
        assert!(matches!(store.write("1").await, Err(StateError::Write { .. })));
    }
}
