use std::collections::HashSet;
use url::Url;

/// The visit ledger: the single dedup choke point of a crawl
///
/// Tracks every canonical URL that has been dispatched as a task, whether
/// already fetched or still in flight. A URL enters the ledger at most once
/// for the lifetime of the crawl; `try_claim` is the only way in.
///
/// The ledger is owned exclusively by the traversal engine and scoped to
/// one crawl run, so independent crawls in the same process never share
/// visit history.
#[derive(Debug, Default)]
pub struct VisitLedger {
    claimed: HashSet<String>,
}

impl VisitLedger {
    /// Creates an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims a canonical URL for visitation
    ///
    /// Returns true the first time it is called for a URL and false on
    /// every later call. Callers must claim before enqueuing; this is what
    /// keeps cyclic link graphs from growing the queue forever.
    pub fn try_claim(&mut self, url: &Url) -> bool {
        self.claimed.insert(url.as_str().to_owned())
    }

    /// Returns true if the URL has already been claimed
    pub fn is_claimed(&self, url: &Url) -> bool {
        self.claimed.contains(url.as_str())
    }

    /// Number of URLs claimed so far
    pub fn len(&self) -> usize {
        self.claimed.len()
    }

    /// Returns true if nothing has been claimed yet
    pub fn is_empty(&self) -> bool {
        self.claimed.is_empty()
    }
}
