//! Href resolution and URL validation

use crate::{UrlError, UrlResult};
use url::Url;

/// Resolves a possibly-relative href against a base URL.
///
/// Scheme-relative, path-relative, and fragment-only hrefs all resolve per
/// standard URL join semantics. An href that is already absolute comes back
/// unchanged modulo normalization. The result must be an absolute http(s)
/// URL with a host, otherwise [`UrlError`] is returned.
pub fn resolve(base: &Url, href: &str) -> UrlResult<Url> {
    let href = href.trim();
    if href.is_empty() {
        return Err(UrlError::Malformed("empty href".to_string()));
    }

    let resolved = base
        .join(href)
        .map_err(|e| UrlError::Malformed(format!("{href}: {e}")))?;

    match resolved.scheme() {
        "http" | "https" => {}
        other => return Err(UrlError::UnsupportedScheme(other.to_string())),
    }

    if resolved.host_str().is_none() {
        return Err(UrlError::MissingHost);
    }

    Ok(resolved)
}

/// Parses and validates a start URL.
///
/// Unlike [`resolve`] there is no base to join against: the string itself
/// must already be an absolute http(s) URL with a host.
pub fn parse_start_url(raw: &str) -> UrlResult<Url> {
    let url = Url::parse(raw.trim()).map_err(|e| UrlError::Malformed(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        other => return Err(UrlError::UnsupportedScheme(other.to_string())),
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost);
    }

    Ok(url)
}

/// Returns true if the string parses as an absolute http(s) URL with a host.
pub fn is_valid_url(raw: &str) -> bool {
    parse_start_url(raw).is_ok()
}
