//! Recorder trait and event types
//!
//! The recorder is the crawl's output sink: every visited page and every
//! discovered link passes through it, in the order the traversal engine
//! settles them.

use thiserror::Error;
use url::Url;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to open log file '{path}': {source}")]
    Open {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to append to log: {0}")]
    Write(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// One anchor encountered on a fetched page
///
/// Emitted exactly once per anchor, whether or not the link is followed:
/// off-domain targets, already-visited targets, and hrefs that failed to
/// resolve all still produce an event.
#[derive(Debug, Clone)]
pub struct LinkEvent {
    /// URL of the page the anchor was found on
    pub source: Url,

    /// The anchor's display text
    pub text: String,

    /// The href attribute, verbatim from the document
    pub raw_href: String,

    /// Canonical resolved target, or None when the href did not resolve
    pub resolved: Option<Url>,
}

impl LinkEvent {
    /// The target to show in records: the resolved URL when there is one,
    /// the raw href otherwise
    pub fn target(&self) -> &str {
        match &self.resolved {
            Some(url) => url.as_str(),
            None => &self.raw_href,
        }
    }
}

/// Trait for crawl recorders
///
/// Recorders append records in call order and must keep every record
/// durable: a record handed to the recorder survives a crash shortly after
/// the call returns. Implementations must be thread-safe.
pub trait Recorder: Send + Sync {
    /// Records a successfully fetched page
    fn record_visit(&self, url: &Url) -> OutputResult<()>;

    /// Records a discovered link
    fn record_link(&self, event: &LinkEvent) -> OutputResult<()>;

    /// Records a fetch failure with its cause
    fn record_failure(&self, url: &Url, cause: &str) -> OutputResult<()>;
}
