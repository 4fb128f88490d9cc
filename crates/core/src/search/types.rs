//! Types for the filing search.

use async_trait::async_trait;
use chrono::{Datelike, Local};
use thiserror::Error;
use url::Url;

use crate::http::ClientBuildError;

/// A filing found on the results page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilingRef {
    /// Opaque identifier, the last path segment of the report URL without `.pdf`.
    pub id: String,
    /// Absolute report URL.
    pub url: Url,
}

impl FilingRef {
    /// Subject line announcing this filing.
    pub fn subject(&self, prefix: &str) -> String {
        format!("{} - {}", prefix, self.id)
    }

    /// Attachment file name for this filing.
    pub fn filename(&self) -> String {
        format!("{}.pdf", self.id)
    }
}

/// Search form fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCriteria {
    /// Sent as `LastName`.
    pub last_name: String,
    /// Sent as `FilingYear`.
    pub filing_year: i32,
}

impl SearchCriteria {
    /// Criteria for the given surname in the current calendar year (local time).
    pub fn current_year(last_name: impl Into<String>) -> Self {
        Self {
            last_name: last_name.into(),
            filing_year: Local::now().year(),
        }
    }

    /// Form body of the search POST.
    pub fn form_fields(&self) -> [(&'static str, String); 2] {
        [
            ("LastName", self.last_name.clone()),
            ("FilingYear", self.filing_year.to_string()),
        ]
    }
}

/// Errors that can occur during a search.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error(transparent)]
    Client(#[from] ClientBuildError),

    #[error("Search request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("Search returned HTTP {status}")]
    Status { status: reqwest::StatusCode },

    #[error("Report link {href:?} cannot be resolved: {source}")]
    InvalidLink {
        href: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Invalid site origin {origin:?}: {source}")]
    InvalidOrigin {
        origin: String,
        #[source]
        source: url::ParseError,
    },
}

/// Trait for filing search backends.
#[async_trait]
pub trait FilingSearcher: Send + Sync {
    /// Backend name for logging.
    fn name(&self) -> &str;

    /// Latest filing matching the criteria, or `None` when the site lists none.
    async fn find_latest(&self, criteria: &SearchCriteria)
        -> Result<Option<FilingRef>, SearchError>;
}
