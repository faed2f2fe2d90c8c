//! Crawl summary statistics
//!
//! Counters the traversal engine accumulates while it runs, printed once
//! the frontier drains.

use crate::state::TaskState;
use std::fmt;

/// Summary statistics for one crawl run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlSummary {
    /// Pages fetched successfully (one per VisitEvent)
    pub pages_visited: u64,

    /// Tasks whose fetch failed
    pub pages_failed: u64,

    /// Anchors recorded, followed or not
    pub links_found: u64,

    /// Links that were claimed and enqueued for fetching
    pub links_followed: u64,

    /// Links whose target host fell outside the allowed domains
    pub links_offsite: u64,

    /// Anchors whose href could not be resolved to a fetchable URL
    pub links_unresolved: u64,
}

impl CrawlSummary {
    /// Creates a new empty summary
    pub fn new() -> Self {
        Self::default()
    }

    /// Tallies a settled task into the page counters
    pub fn tally_task(&mut self, state: TaskState) {
        match state {
            TaskState::Succeeded => self.pages_visited += 1,
            TaskState::Failed => self.pages_failed += 1,
            // Active states carry no outcome to count
            TaskState::Pending | TaskState::Fetching | TaskState::Drained => {}
        }
    }

    /// Total number of tasks that reached a settled state
    pub fn total_pages(&self) -> u64 {
        self.pages_visited + self.pages_failed
    }
}

impl fmt::Display for CrawlSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Crawl summary:")?;
        writeln!(f, "  Pages visited:   {}", self.pages_visited)?;
        writeln!(f, "  Pages failed:    {}", self.pages_failed)?;
        writeln!(f, "  Links found:     {}", self.links_found)?;
        writeln!(f, "  Links followed:  {}", self.links_followed)?;
        writeln!(f, "  Links off-site:  {}", self.links_offsite)?;
        write!(f, "  Links unresolved: {}", self.links_unresolved)
    }
}
