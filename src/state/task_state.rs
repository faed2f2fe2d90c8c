/// Task state definitions for tracking crawl progress
///
/// Every crawl task moves through the same lifecycle:
/// Pending -> Fetching -> (Succeeded | Failed) -> Drained.
use std::fmt;

/// The state of a single crawl task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskState {
    /// Claimed and queued, waiting for a fetch slot
    Pending,

    /// Fetch is in flight
    Fetching,

    /// Fetch returned a document; its anchors have been processed
    Succeeded,

    /// Fetch failed; the failure is recorded and no links were extracted
    Failed,

    /// Task has been recorded and removed from accounting
    Drained,
}

impl TaskState {
    /// Returns true if the task may still produce work
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Pending | Self::Fetching)
    }

    /// Returns true once the fetch outcome is known
    pub fn is_settled(&self) -> bool {
        !self.is_active()
    }

    /// Returns true if a transition from this state to `next` is legal
    pub fn can_transition_to(&self, next: TaskState) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Fetching)
                | (Self::Fetching, Self::Succeeded)
                | (Self::Fetching, Self::Failed)
                | (Self::Succeeded, Self::Drained)
                | (Self::Failed, Self::Drained)
        )
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Fetching => "fetching",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
            Self::Drained => "drained",
        };
        write!(f, "{}", s)
    }
}
