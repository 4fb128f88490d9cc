//! HTTP client construction shared by the search client and the report fetcher.

use std::time::Duration;

use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT_LANGUAGE, CONTENT_TYPE, REFERER, USER_AGENT,
};
use reqwest::Client;
use thiserror::Error;

use crate::config::HeadersConfig;

/// Errors building the HTTP client.
#[derive(Debug, Error)]
pub enum ClientBuildError {
    #[error("Invalid value for header {name}")]
    InvalidHeader {
        name: HeaderName,
        #[source]
        source: reqwest::header::InvalidHeaderValue,
    },

    #[error("Failed to create HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}

/// Turn the configured header set into a `HeaderMap`, skipping unset entries.
pub fn header_map(headers: &HeadersConfig) -> Result<HeaderMap, ClientBuildError> {
    let mut map = HeaderMap::new();

    for (name, value) in [
        (USER_AGENT, &headers.user_agent),
        (REFERER, &headers.referer),
        (ACCEPT_LANGUAGE, &headers.accept_language),
        (CONTENT_TYPE, &headers.content_type),
    ] {
        if let Some(value) = value {
            let value = HeaderValue::from_str(value).map_err(|source| {
                ClientBuildError::InvalidHeader {
                    name: name.clone(),
                    source,
                }
            })?;
            map.insert(name, value);
        }
    }

    Ok(map)
}

/// Build a client sending the configured headers on every request.
///
/// With `cookie_store` the client keeps cookies between requests, which is
/// what makes it a session.
pub fn build_client(
    headers: &HeadersConfig,
    timeout_secs: u32,
    cookie_store: bool,
) -> Result<Client, ClientBuildError> {
    let client = Client::builder()
        .timeout(Duration::from_secs(timeout_secs as u64))
        .default_headers(header_map(headers)?)
        .cookie_store(cookie_store)
        .build()?;

    Ok(client)
}
