//! In-memory state store for testing.

use async_trait::async_trait;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::state::{StateError, StateStore};

/// In-memory implementation of the StateStore trait with failure injection.
#[derive(Debug, Clone, Default)]
pub struct MockStateStore {
    value: Arc<RwLock<Option<String>>>,
    writes: Arc<RwLock<Vec<String>>>,
    fail_reads: Arc<RwLock<bool>>,
    fail_writes: Arc<RwLock<bool>>,
}

impl MockStateStore {
    /// Create an empty store, as on a first run.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store already holding an id.
    pub fn with_value(id: &str) -> Self {
        Self {
            value: Arc::new(RwLock::new(Some(id.to_string()))),
            ..Self::default()
        }
    }

    /// Current stored id.
    pub async fn value(&self) -> Option<String> {
        self.value.read().await.clone()
    }

    /// Every id successfully written, in order.
    pub async fn writes(&self) -> Vec<String> {
        self.writes.read().await.clone()
    }

    /// Make reads fail until reset.
    pub async fn set_fail_reads(&self, fail: bool) {
        *self.fail_reads.write().await = fail;
    }

    /// Make writes fail until reset.
    pub async fn set_fail_writes(&self, fail: bool) {
        *self.fail_writes.write().await = fail;
    }

    fn mock_path() -> PathBuf {
        PathBuf::from("<memory>")
    }
}

#[async_trait]
impl StateStore for MockStateStore {
    async fn read(&self) -> Result<Option<String>, StateError> {
        if *self.fail_reads.read().await {
            return Err(StateError::Read {
                path: Self::mock_path(),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "injected read failure"),
            });
        }
        Ok(self.value.read().await.clone())
    }

    async fn write(&self, id: &str) -> Result<(), StateError> {
        if *self.fail_writes.read().await {
            return Err(StateError::Write {
                path: Self::mock_path(),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "injected write failure"),
            });
        }
        *self.value.write().await = Some(id.to_string());
        self.writes.write().await.push(id.to_string());
        Ok(())
    }
}
