//! Search client for the House Clerk financial disclosure site.

use async_trait::async_trait;
use tracing::{debug, info};
use url::Url;

use crate::config::{HeadersConfig, SiteConfig};
use crate::http::build_client;

use super::parser::parse_results;
use super::{FilingRef, FilingSearcher, SearchCriteria, SearchError};

/// Search client for the clerk's disclosure search form.
///
/// Every search opens a fresh session: a GET of the search page to pick up
/// the cookie the site expects, then the form POST on the same client.
pub struct ClerkSearcher {
    site: SiteConfig,
    headers: HeadersConfig,
}

impl ClerkSearcher {
    pub fn new(site: SiteConfig, headers: HeadersConfig) -> Self {
        Self { site, headers }
    }
}

#[async_trait]
impl FilingSearcher for ClerkSearcher {
    fn name(&self) -> &str {
        "house-clerk"
    }

    async fn find_latest(
        &self,
        criteria: &SearchCriteria,
    ) -> Result<Option<FilingRef>, SearchError> {
        let origin = Url::parse(&self.site.origin).map_err(|source| SearchError::InvalidOrigin {
            origin: self.site.origin.clone(),
            source,
        })?;
        let session = build_client(&self.headers, self.site.timeout_secs, true)?;

        info!(
            last_name = %criteria.last_name,
            year = criteria.filing_year,
            "Searching for filings"
        );

        let bootstrap = session
            .get(&self.site.view_search_url)
            .send()
            .await
            .map_err(SearchError::Request)?;
        debug!(status = %bootstrap.status(), "Search page fetched");

        let response = session
            .post(&self.site.search_url)
            .form(&criteria.form_fields())
            .send()
            .await
            .map_err(SearchError::Request)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status { status });
        }

        let body = response.text().await.map_err(SearchError::Request)?;
        let latest = parse_results(&body, &origin)?;

        match &latest {
            Some(filing) => debug!(id = %filing.id, url = %filing.url, "Latest filing found"),
            None => info!("No filings found"),
        }

        Ok(latest)
    }
}
