//! Mock searcher for testing.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::search::{FilingRef, FilingSearcher, SearchCriteria, SearchError};

/// Mock implementation of the FilingSearcher trait.
///
/// Returns a configurable latest filing, records every search and can be
/// told to fail the next one.
#[derive(Debug, Clone, Default)]
pub struct MockSearcher {
    latest: Arc<RwLock<Option<FilingRef>>>,
    searches: Arc<RwLock<Vec<SearchCriteria>>>,
    next_error: Arc<RwLock<Option<SearchError>>>,
}

impl MockSearcher {
    /// Create a mock searcher that finds nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock searcher reporting the given filing as latest.
    pub fn with_latest(filing: FilingRef) -> Self {
        Self {
            latest: Arc::new(RwLock::new(Some(filing))),
            ..Self::default()
        }
    }

    /// Set the filing returned by subsequent searches.
    pub async fn set_latest(&self, filing: Option<FilingRef>) {
        *self.latest.write().await = filing;
    }

    /// Configure the next search to fail with the given error.
    pub async fn set_next_error(&self, error: SearchError) {
        *self.next_error.write().await = Some(error);
    }

    /// Get recorded search criteria.
    pub async fn recorded_searches(&self) -> Vec<SearchCriteria> {
        self.searches.read().await.clone()
    }

    /// Get the number of searches performed.
    pub async fn search_count(&self) -> usize {
        self.searches.read().await.len()
    }
}

#[async_trait]
impl FilingSearcher for MockSearcher {
    fn name(&self) -> &str {
        "mock"
    }

    async fn find_latest(
        &self,
        criteria: &SearchCriteria,
    ) -> Result<Option<FilingRef>, SearchError> {
        self.searches.write().await.push(criteria.clone());

        if let Some(err) = self.next_error.write().await.take() {
            return Err(err);
        }

        Ok(self.latest.read().await.clone())
    }
}
