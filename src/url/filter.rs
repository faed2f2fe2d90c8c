use crate::url::{extract_host, matches_wildcard};
use url::Url;

/// The allowed-domain set: decides whether a candidate URL is in scope
///
/// Fixed at crawl start. Matching is a pure function of the URL's host
/// against the configured patterns; the filter holds no other state and is
/// never mutated during a crawl.
#[derive(Debug, Clone)]
pub struct DomainFilter {
    patterns: Vec<String>,
}

impl DomainFilter {
    /// Creates a filter from host patterns ("example.com", "*.example.com")
    ///
    /// Patterns are lowercased on the way in so matching stays
    /// case-insensitive against lowercased hosts.
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            patterns: patterns
                .into_iter()
                .map(|p| p.into().to_lowercase())
                .collect(),
        }
    }

    /// Returns true iff the URL's host matches one of the allowed patterns
    pub fn is_allowed(&self, url: &Url) -> bool {
        let Some(host) = extract_host(url) else {
            return false;
        };

        self.patterns
            .iter()
            .any(|pattern| matches_wildcard(pattern, &host))
    }

    /// The patterns this filter was built from
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}
