//! Watcher implementation.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::config::default_subject_prefix;
use crate::fetcher::{FetchOutcome, ReportFetcher};
use crate::notifier::{Notification, Notifier};
use crate::search::{FilingSearcher, SearchCriteria};
use crate::state::StateStore;

use super::types::{CheckReport, RunOutcome, WatchError};

/// Drives one search-compare-fetch-notify-persist cycle.
pub struct FilingWatcher {
    searcher: Arc<dyn FilingSearcher>,
    fetcher: Arc<dyn ReportFetcher>,
    notifier: Arc<dyn Notifier>,
    state: Arc<dyn StateStore>,
    subject_prefix: String,
}

impl FilingWatcher {
    pub fn new(
        searcher: Arc<dyn FilingSearcher>,
        fetcher: Arc<dyn ReportFetcher>,
        notifier: Arc<dyn Notifier>,
        state: Arc<dyn StateStore>,
    ) -> Self {
        Self {
            searcher,
            fetcher,
            notifier,
            state,
            subject_prefix: default_subject_prefix(),
        }
    }

    /// Set the text placed before the filing id in the subject line.
    pub fn with_subject_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.subject_prefix = prefix.into();
        self
    }

    /// Last seen id. A read failure is logged and treated as "nothing seen".
    async fn last_seen(&self) -> Option<String> {
        match self.state.read().await {
            Ok(id) => id,
            Err(e) => {
                warn!("Could not read last filing id, treating as none: {}", e);
                None
            }
        }
    }

    /// Run one cycle.
    ///
    /// The id is persisted only after the notifier reports success. Any error
    /// returned from here means nothing was written.
    pub async fn run_once(&self, criteria: &SearchCriteria) -> Result<RunOutcome, WatchError> {
        let last_seen = self.last_seen().await;

        let Some(filing) = self.searcher.find_latest(criteria).await? else {
            info!(searcher = self.searcher.name(), "No new filing found");
            return Ok(RunOutcome::NoResults);
        };

        if last_seen.as_deref() == Some(filing.id.as_str()) {
            info!(id = %filing.id, "No new filing since last run");
            return Ok(RunOutcome::AlreadySeen { id: filing.id });
        }

        info!(id = %filing.id, previous = ?last_seen, "New filing found");

        let content = match self.fetcher.fetch(&filing.url).await? {
            FetchOutcome::Pdf(content) => content,
            FetchOutcome::NotPdf { content_type } => {
                warn!(
                    id = %filing.id,
                    content_type = %content_type,
                    "Report is not a PDF, skipping"
                );
                return Ok(RunOutcome::NotPdf {
                    id: filing.id,
                    content_type,
                });
            }
        };

        let notification = Notification::new(filing.subject(&self.subject_prefix))
            .with_attachment(filing.filename(), content);
        self.notifier.send(&notification).await?;
        info!(id = %filing.id, notifier = self.notifier.name(), "Filing delivered");

        let state_saved = match self.state.write(&filing.id).await {
            Ok(()) => {
                info!(id = %filing.id, "Saved last filing id");
                true
            }
            Err(e) => {
                error!(id = %filing.id, "Email sent but the filing id was not saved: {}", e);
                false
            }
        };

        Ok(RunOutcome::Delivered {
            id: filing.id,
            state_saved,
        })
    }

    /// Search and compare only. Never downloads, sends or writes.
    pub async fn check(&self, criteria: &SearchCriteria) -> Result<CheckReport, WatchError> {
        let last_seen = self.last_seen().await;
        let latest = self.searcher.find_latest(criteria).await?;
        let is_new = latest
            .as_ref()
            .is_some_and(|f| last_seen.as_deref() != Some(f.id.as_str()));

        Ok(CheckReport {
            last_seen,
            latest,
            is_new,
        })
    }
}
