//! Mock report fetcher for testing.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use url::Url;

use crate::fetcher::{FetchError, FetchOutcome, ReportFetcher};

use super::fixtures;

/// Mock implementation of the ReportFetcher trait.
///
/// Serves a PDF by default. Can be switched to another content type or told
/// to fail the next download.
#[derive(Debug, Clone)]
pub struct MockFetcher {
    outcome: Arc<RwLock<FetchOutcome>>,
    fetched: Arc<RwLock<Vec<Url>>>,
    next_error: Arc<RwLock<Option<FetchError>>>,
}

impl Default for MockFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl MockFetcher {
    /// Create a mock fetcher that serves `fixtures::pdf_bytes()`.
    pub fn new() -> Self {
        Self {
            outcome: Arc::new(RwLock::new(FetchOutcome::Pdf(fixtures::pdf_bytes()))),
            fetched: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
        }
    }

    /// Serve the body as a PDF.
    pub async fn serve_pdf(&self, content: Vec<u8>) {
        *self.outcome.write().await = FetchOutcome::Pdf(content);
    }

    /// Answer with a non-PDF content type.
    pub async fn serve_content_type(&self, content_type: &str) {
        *self.outcome.write().await = FetchOutcome::NotPdf {
            content_type: content_type.to_string(),
        };
    }

    /// Configure the next download to fail with the given error.
    pub async fn set_next_error(&self, error: FetchError) {
        *self.next_error.write().await = Some(error);
    }

    /// URLs requested so far.
    pub async fn fetched_urls(&self) -> Vec<Url> {
        self.fetched.read().await.clone()
    }

    /// Get the number of downloads attempted.
    pub async fn fetch_count(&self) -> usize {
        self.fetched.read().await.len()
    }
}

#[async_trait]
impl ReportFetcher for MockFetcher {
    async fn fetch(&self, url: &Url) -> Result<FetchOutcome, FetchError> {
        self.fetched.write().await.push(url.clone());

        if let Some(err) = self.next_error.write().await.take() {
            return Err(err);
        }

        Ok(self.outcome.read().await.clone())
    }
}
