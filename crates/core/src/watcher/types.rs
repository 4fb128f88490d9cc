//! Watcher types.

use thiserror::Error;

use crate::fetcher::FetchError;
use crate::notifier::NotifyError;
use crate::search::{FilingRef, SearchError};

/// How a cycle ended when nothing failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The results page listed no filings.
    NoResults,
    /// The latest filing was already announced.
    AlreadySeen { id: String },
    /// The report was not served as a PDF; nothing was sent or saved.
    NotPdf { id: String, content_type: String },
    /// The report was emailed. `state_saved` is false when persisting the id
    /// failed, in which case the next run will announce it again.
    Delivered { id: String, state_saved: bool },
}

/// Result of a side-effect-free check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    pub last_seen: Option<String>,
    pub latest: Option<FilingRef>,
    pub is_new: bool,
}

/// Failures that abort a cycle before the state is written.
#[derive(Debug, Error)]
pub enum WatchError {
    #[error("Search failed: {0}")]
    Search(#[from] SearchError),

    #[error("Report download failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Notification failed: {0}")]
    Notify(#[from] NotifyError),
}

impl WatchError {
    /// Process exit code for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            WatchError::Search(_) => 2,
            WatchError::Fetch(_) => 3,
            WatchError::Notify(_) => 4,
        }
    }
}
