//! HTTP report fetcher.

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tracing::{debug, info, warn};
use url::Url;

use crate::config::{HeadersConfig, SiteConfig};
use crate::http::build_client;

use super::{FetchError, FetchOutcome, ReportFetcher};

/// Downloads reports with the configured site headers. No cookies are kept.
pub struct HttpReportFetcher {
    client: Client,
}

impl HttpReportFetcher {
    pub fn new(site: &SiteConfig, headers: &HeadersConfig) -> Result<Self, FetchError> {
        let client = build_client(headers, site.timeout_secs, false)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ReportFetcher for HttpReportFetcher {
    async fn fetch(&self, url: &Url) -> Result<FetchOutcome, FetchError> {
        info!(url = %url, "Downloading report");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: url.clone(),
                source,
            })?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        if !FetchOutcome::is_pdf_content_type(&content_type) {
            warn!(
                url = %url,
                status = %response.status(),
                content_type = %content_type,
                "Downloaded file is not a PDF"
            );
            return Ok(FetchOutcome::NotPdf { content_type });
        }

        // Content-Length is not trusted for preallocation.
        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|source| FetchError::Body {
                url: url.clone(),
                source,
            })?;
            body.extend_from_slice(&chunk);
        }

        debug!(url = %url, bytes = body.len(), "Report downloaded");
        Ok(FetchOutcome::Pdf(body))
    }
}
