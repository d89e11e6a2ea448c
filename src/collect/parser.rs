//! Anchor extraction from the seed page HTML

use scraper::{Html, Selector};
use url::Url;

/// Extracts all hyperlink targets from HTML, resolved to absolute URLs
///
/// Hrefs are resolved against `base_url` and normalized by
/// [`crate::url::normalize_target`]; non-navigational hrefs (javascript:,
/// mailto:, tel:, data:, fragment-only) are dropped there. Duplicates are
/// preserved here; the caller dedups.
pub fn extract_links(html: &str, base_url: &Url) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();

    if let Ok(selector) = Selector::parse("a[href]") {
        for element in document.select(&selector) {
            if let Some(href) = element.value().attr("href") {
                if let Some(normalized) = crate::url::normalize_target(base_url, href) {
                    links.push(normalized);
                }
            }
        }
    }

    links
}
