//! Report download.

mod http_fetcher;
mod types;

pub use http_fetcher::HttpReportFetcher;
pub use types::*;
