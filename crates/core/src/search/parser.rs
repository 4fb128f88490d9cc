//! Results page scraping.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};
use url::Url;

use super::{FilingRef, SearchError};

/// Where the most recent filing sits in the results table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultOrder {
    LatestFirst,
    LatestLast,
}

/// The clerk site lists the most recent filing as the last table row.
/// This is a property of the site's rendering, not something derived from
/// the row contents.
pub const RESULT_ORDER: ResultOrder = ResultOrder::LatestLast;

static ROW_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("tbody tr").expect("static selector"));
static LINK_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("static selector"));

/// Extract the latest filing from a results page.
///
/// Returns `Ok(None)` when the table has no rows, the chosen row has no link,
/// or the link yields an empty identifier.
pub fn parse_results(html: &str, origin: &Url) -> Result<Option<FilingRef>, SearchError> {
    parse_results_ordered(html, origin, RESULT_ORDER)
}

fn parse_results_ordered(
    html: &str,
    origin: &Url,
    order: ResultOrder,
) -> Result<Option<FilingRef>, SearchError> {
    let document = Html::parse_document(html);
    let rows: Vec<ElementRef<'_>> = document.select(&ROW_SELECTOR).collect();
    debug!(rows = rows.len(), "Parsed results table");

    let row = match order {
        ResultOrder::LatestFirst => rows.first(),
        ResultOrder::LatestLast => rows.last(),
    };
    let Some(row) = row else {
        return Ok(None);
    };

    let Some(href) = row
        .select(&LINK_SELECTOR)
        .next()
        .and_then(|a| a.value().attr("href"))
    else {
        debug!("Latest result row has no report link");
        return Ok(None);
    };

    let url = resolve_link(href, origin).map_err(|source| SearchError::InvalidLink {
        href: href.to_string(),
        source,
    })?;

    match filing_id_from_url(&url) {
        Some(id) => Ok(Some(FilingRef { id, url })),
        None => {
            warn!(url = %url, "Report link has no usable identifier");
            Ok(None)
        }
    }
}

/// Resolve a report link. Absolute links are kept; anything else is appended
/// to the site origin, which must end with `/`.
pub fn resolve_link(href: &str, origin: &Url) -> Result<Url, url::ParseError> {
    let href = href.trim();
    match Url::parse(href) {
        Ok(url) => Ok(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => origin.join(href.trim_start_matches('/')),
        Err(e) => Err(e),
    }
}

/// Final path segment with a `.pdf` suffix removed.
pub fn filing_id_from_url(url: &Url) -> Option<String> {
    let segment = url.path_segments()?.last()?;
    let id = segment.strip_suffix(".pdf").unwrap_or(segment);
    if id.is_empty() {
        None
    } else {
        Some(id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin() -> Url {
        Url::parse("https://disclosures-clerk.house.gov/").unwrap()
    }

    fn page(rows: &str) -> String {
        format!(
            r#"<html><body>
<table class="library-table">
  <thead><tr><th>Name</th><th>Office</th><th>Filing Year</th><th>Filing</th></tr></thead>
  <tbody>{}</tbody>
</table>
</body></html>"#,
            rows
        )
    }

    #[test]
    fn test_empty_table_yields_none() {
        let result = parse_results(&page(""), &origin()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_page_without_table_yields_none() {
        let html = "<html><body><p>No records found.</p></body></html>";
        assert!(parse_results(html, &origin()).unwrap().is_none());
    }

    #[test]
    fn test_relative_link_resolves_against_origin() {
        let html = page(r#"<tr><td><a href="/foo/123.pdf">Hon. Nancy Pelosi</a></td></tr>"#);
        let filing = parse_results(&html, &origin()).unwrap().unwrap();
        assert_eq!(filing.id, "123");
        assert_eq!(
            filing.url.as_str(),
            "https://disclosures-clerk.house.gov/foo/123.pdf"
        );
    }

    #[test]
    fn test_last_row_is_taken() {
        let html = page(
            r#"
<tr><td><a href="public_disc/ptr-pdfs/2024/20024542.pdf">Pelosi</a></td><td>CA11</td></tr>
<tr><td><a href="public_disc/ptr-pdfs/2024/20025235.pdf">Pelosi</a></td><td>CA11</td></tr>
<tr><td><a href="public_disc/ptr-pdfs/2024/20026545.pdf">Pelosi</a></td><td>CA11</td></tr>
"#,
        );
        let filing = parse_results(&html, &origin()).unwrap().unwrap();
        assert_eq!(filing.id, "20026545");
        assert_eq!(
            filing.url.as_str(),
            "https://disclosures-clerk.house.gov/public_disc/ptr-pdfs/2024/20026545.pdf"
        );
    }

    #[test]
    fn test_latest_first_order_takes_first_row() {
        let html = page(
            r#"
<tr><td><a href="/a/1.pdf">first</a></td></tr>
<tr><td><a href="/a/2.pdf">second</a></td></tr>
"#,
        );
        let filing = parse_results_ordered(&html, &origin(), ResultOrder::LatestFirst)
            .unwrap()
            .unwrap();
        assert_eq!(filing.id, "1");
    }

    #[test]
    fn test_last_row_without_link_yields_none() {
        let html = page(
            r#"
<tr><td><a href="/a/1.pdf">first</a></td></tr>
<tr><td>Pending</td></tr>
"#,
        );
        assert!(parse_results(&html, &origin()).unwrap().is_none());
    }

    #[test]
    fn test_absolute_link_is_kept() {
        let html = page(
            r#"<tr><td><a href="https://mirror.example.org/reports/777.pdf">x</a></td></tr>"#,
        );
        let filing = parse_results(&html, &origin()).unwrap().unwrap();
        assert_eq!(filing.id, "777");
        assert_eq!(filing.url.host_str(), Some("mirror.example.org"));
    }

    #[test]
    fn test_link_without_pdf_suffix_keeps_segment() {
        let url = Url::parse("https://example.com/reports/8221").unwrap();
        assert_eq!(filing_id_from_url(&url).as_deref(), Some("8221"));
    }

    #[test]
    fn test_directory_link_has_no_identifier() {
        let url = Url::parse("https://example.com/reports/").unwrap();
        assert!(filing_id_from_url(&url).is_none());
    }
}
