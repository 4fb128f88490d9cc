//! Testing utilities and mock implementations.
//!
//! Mocks for every component trait, so the watcher can be exercised without
//! the network or a mail relay.
//!
//! # Example
//!
//! ```rust,ignore
//! use filing_watch_core::testing::{fixtures, MockFetcher, MockNotifier, MockSearcher, MockStateStore};
//!
//! let searcher = MockSearcher::with_latest(fixtures::filing("124"));
//! let state = MockStateStore::with_value("123");
//! let notifier = MockNotifier::new();
//!
//! // Build a FilingWatcher from Arc clones, run it, then:
//! assert_eq!(notifier.sent_count().await, 1);
//! assert_eq!(state.value().await.as_deref(), Some("124"));
//! ```

mod mock_fetcher;
mod mock_notifier;
mod mock_searcher;
mod mock_state_store;

pub use mock_fetcher::MockFetcher;
pub use mock_notifier::MockNotifier;
pub use mock_searcher::MockSearcher;
pub use mock_state_store::MockStateStore;

/// Test fixtures and helper functions.
pub mod fixtures {
    use url::Url;

    use crate::search::{FilingRef, SearchCriteria};

    /// A filing on the clerk site with the given id.
    pub fn filing(id: &str) -> FilingRef {
        FilingRef {
            id: id.to_string(),
            url: Url::parse(&format!(
                "https://disclosures-clerk.house.gov/public_disc/ptr-pdfs/2024/{}.pdf",
                id
            ))
            .expect("fixture URL"),
        }
    }

    /// Criteria with a fixed year so tests do not depend on the clock.
    pub fn criteria() -> SearchCriteria {
        SearchCriteria {
            last_name: "pelosi".to_string(),
            filing_year: 2024,
        }
    }

    /// Bytes that look enough like a PDF for the mocks.
    pub fn pdf_bytes() -> Vec<u8> {
        b"%PDF-1.4\n%mock report\n%%EOF\n".to_vec()
    }
}
