//! Filing search.
//!
//! A `FilingSearcher` posts the site's search form and reports the latest
//! filing on the results page. `ClerkSearcher` talks to the live site;
//! `parse_results` holds the page scraping so it can be exercised offline.

mod clerk;
mod parser;
mod types;

pub use clerk::ClerkSearcher;
pub use parser::{filing_id_from_url, parse_results, resolve_link, ResultOrder, RESULT_ORDER};
pub use types::*;
