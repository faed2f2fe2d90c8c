use crate::UrlError;
use url::Url;

/// Resolves a raw href against the page it appeared on, producing the
/// canonical absolute URL used as the dedup key
///
/// # Resolution Rules
///
/// 1. Resolve the reference against the base per RFC 3986 (`Url::join`),
///    which covers absolute URLs, rooted paths (`/a`), relative paths
///    (`../x`), scheme-relative references (`//host/path`), and
///    fragment-only references (`#section`)
/// 2. Reject anything that does not resolve to HTTP or HTTPS
///    (`mailto:`, `javascript:`, `tel:`, `data:` and friends)
/// 3. Strip the fragment: `/page#a` and `/page#b` name the same resource,
///    so they must share one canonical form
///
/// # Arguments
///
/// * `base` - The URL of the page the href was found on
/// * `raw_href` - The href attribute value, verbatim from the document
///
/// # Returns
///
/// * `Ok(Url)` - Canonical absolute URL
/// * `Err(UrlError)` - The href cannot be resolved to a fetchable URL
///
/// # Examples
///
/// ```
/// use linktrail::url::resolve_href;
/// use url::Url;
///
/// let base = Url::parse("https://example.com/docs/intro").unwrap();
/// let resolved = resolve_href(&base, "../guide#setup").unwrap();
/// assert_eq!(resolved.as_str(), "https://example.com/guide");
/// ```
pub fn resolve_href(base: &Url, raw_href: &str) -> Result<Url, UrlError> {
    let raw = raw_href.trim();

    let mut resolved = base
        .join(raw)
        .map_err(|e| UrlError::Parse(format!("'{}': {}", raw, e)))?;

    if resolved.scheme() != "http" && resolved.scheme() != "https" {
        return Err(UrlError::UnsupportedScheme(resolved.scheme().to_string()));
    }

    if resolved.host_str().is_none() {
        return Err(UrlError::MissingHost);
    }

    resolved.set_fragment(None);

    Ok(resolved)
}
