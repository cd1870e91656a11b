//! URL handling for hopcrawl
//!
//! This module resolves hrefs against base URLs, validates start URLs, and
//! applies the domain exclusion predicate. Robots.txt applies per origin, so
//! it also derives the origin key used by the politeness gate's cache.

mod exclude;
mod resolve;

pub use exclude::is_excluded;
pub use resolve::{is_valid_url, parse_start_url, resolve};

use url::Url;

/// Derives the origin key (`scheme://host[:port]`) for a URL.
///
/// The port is included only when it differs from the scheme default, which
/// matches how the `url` crate renders origins.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use hopcrawl::url::origin_key;
///
/// let url = Url::parse("https://example.com/a/b?q=1").unwrap();
/// assert_eq!(origin_key(&url), "https://example.com");
///
/// let url = Url::parse("http://example.com:8080/a").unwrap();
/// assert_eq!(origin_key(&url), "http://example.com:8080");
/// ```
pub fn origin_key(url: &Url) -> String {
    url.origin().ascii_serialization()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_key_default_port_omitted() {
        let url = Url::parse("https://example.com:443/path").unwrap();
        assert_eq!(origin_key(&url), "https://example.com");
    }

    #[test]
    fn test_origin_key_custom_port_kept() {
        let url = Url::parse("http://example.com:8080/path").unwrap();
        assert_eq!(origin_key(&url), "http://example.com:8080");
    }

    #[test]
    fn test_origin_key_ignores_path_and_query() {
        let a = Url::parse("http://example.com/a?x=1").unwrap();
        let b = Url::parse("http://example.com/b#frag").unwrap();
        assert_eq!(origin_key(&a), origin_key(&b));
    }

    #[test]
    fn test_origin_key_distinguishes_schemes() {
        let a = Url::parse("http://example.com/").unwrap();
        let b = Url::parse("https://example.com/").unwrap();
        assert_ne!(origin_key(&a), origin_key(&b));
    }
}
