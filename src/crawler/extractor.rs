//! Link extraction from HTML
//!
//! Takes the first `limit` href-carrying anchors in document order, resolves
//! each against the base URL, and collects the survivors into a deduplicated
//! list. Individual bad hrefs are skipped; scraper's parser recovers what it
//! can from malformed markup, so extraction never fails a page outright.

use crate::url::resolve;
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Extracts at most `limit` absolute link URLs from an HTML document.
///
/// The limit applies to anchors considered, not links returned: an anchor
/// whose href fails to resolve still consumes a slot, matching the fetch
/// budget a caller sets per page. Duplicates within the page collapse.
///
/// # Arguments
///
/// * `base_url` - The base to resolve relative hrefs against
/// * `html` - The page content to parse
/// * `limit` - Maximum number of anchors to consider
///
/// # Returns
///
/// A deduplicated list of absolute URLs, never longer than `limit`
pub fn extract_links(base_url: &Url, html: &str, limit: usize) -> Vec<Url> {
    let document = Html::parse_document(html);

    // "a[href]" is a valid selector; parse can only fail on a typo here.
    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for element in document.select(&selector).take(limit) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        match resolve(base_url, href) {
            Ok(url) => {
                if seen.insert(url.clone()) {
                    links.push(url);
                }
            }
            Err(e) => {
                tracing::debug!(href, error = %e, "Skipping unresolvable href");
            }
        }
    }

    links
}
