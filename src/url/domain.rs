use url::Url;

/// Extracts the host from a URL, lowercased
///
/// The host is what the domain filter matches against. URLs without a host
/// (which cannot happen for resolved HTTP(S) URLs) yield None.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use linktrail::url::extract_host;
///
/// let url = Url::parse("https://Blog.Example.COM/post").unwrap();
/// assert_eq!(extract_host(&url), Some("blog.example.com".to_string()));
/// ```
pub fn extract_host(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}
