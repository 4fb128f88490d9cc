//! Types for report fetching.

use async_trait::async_trait;
use thiserror::Error;
use url::Url;

use crate::http::ClientBuildError;

/// Result of a download attempt that reached the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The response was declared a PDF; the full body.
    Pdf(Vec<u8>),
    /// The response declared some other content type. The body is not read.
    NotPdf { content_type: String },
}

impl FetchOutcome {
    /// Classify a `Content-Type` value. Anything mentioning `pdf` is accepted.
    pub fn is_pdf_content_type(content_type: &str) -> bool {
        content_type.contains("pdf")
    }
}

/// Errors that can occur while downloading a report.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Client(#[from] ClientBuildError),

    #[error("Report request to {url} failed: {source}")]
    Request {
        url: Url,
        #[source]
        source: reqwest::Error,
    },

    #[error("Reading report body from {url} failed: {source}")]
    Body {
        url: Url,
        #[source]
        source: reqwest::Error,
    },
}

/// Trait for report download backends.
#[async_trait]
pub trait ReportFetcher: Send + Sync {
    /// Download the report at `url`, buffering the whole body in memory.
    async fn fetch(&self, url: &Url) -> Result<FetchOutcome, FetchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_content_types() {
        assert!(FetchOutcome::is_pdf_content_type("application/pdf"));
        assert!(FetchOutcome::is_pdf_content_type("application/x-pdf; charset=binary"));
        assert!(!FetchOutcome::is_pdf_content_type("text/html; charset=utf-8"));
        assert!(!FetchOutcome::is_pdf_content_type(""));
    }
}
