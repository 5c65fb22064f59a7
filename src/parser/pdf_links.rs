//! PDF link extraction from raw page text.
//!
//! Matching is lexical: no markup is parsed, and matches are not validated
//! as URLs. A link split across constructs is simply missed.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, trace};

use super::link_set::LinkSet;

/// Regex pattern for PDF URLs.
///
/// `scheme://host/path.pdf` with an optional `?query`. The path is matched
/// lazily so the first `.pdf` ends it; whitespace, quotes and angle brackets
/// end a candidate, which keeps matches inside HTML attributes and text.
#[allow(clippy::expect_used)]
static PDF_URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"https?://[^\s"'<>]+?\.pdf(\?[^\s"'<>]*)?"#).expect("PDF URL regex is valid")
});

/// Extracts every PDF URL in `text`, keeping the first occurrence of each.
///
/// # Examples
///
/// ```
/// use pdf_scraper::parser::extract_pdf_links;
///
/// let links = extract_pdf_links("<a href='https://ex.com/a.pdf'>x</a> https://ex.com/a.pdf");
/// assert_eq!(links.as_slice(), ["https://ex.com/a.pdf"]);
/// ```
#[tracing::instrument(skip(text), fields(text_len = text.len()))]
#[must_use]
pub fn extract_pdf_links(text: &str) -> LinkSet {
    let mut links = LinkSet::new();
    let mut matched = 0_usize;

    for found in PDF_URL_PATTERN.find_iter(text) {
        matched += 1;
        let link = found.as_str();
        if links.insert(link) {
            trace!(url = %link, "found PDF link");
        }
    }

    debug!(
        matched,
        unique = links.len(),
        "PDF link extraction finished"
    );
    links
}
