//! Domain exclusion predicate

use url::Url;

/// Returns true if any excluded-domain entry is a substring of the URL's host.
///
/// The match is a plain substring check over the lowercased host, not an
/// exact or suffix match: an entry `example.com` excludes `example.com`,
/// `sub.example.com`, and also `notexample.com.evil.org`. That last case is a
/// known sharp edge carried over deliberately for compatibility; callers who
/// want suffix semantics should pre-anchor their entries (e.g. `.example.com`).
pub fn is_excluded(url: &Url, excluded_domains: &[String]) -> bool {
    let Some(host) = url.host_str() else {
        return false;
    };
    let host = host.to_lowercase();

    excluded_domains
        .iter()
        .any(|domain| !domain.is_empty() && host.contains(&domain.to_lowercase()))
}
