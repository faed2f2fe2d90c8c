//! Output module for recording crawl events
//!
//! This module handles:
//! - The `Recorder` trait the traversal engine reports into
//! - The file-backed recorder (append-only log plus stdout echo)
//! - Summary statistics for a finished crawl

mod log;
pub mod stats;
mod traits;

pub use log::FileRecorder;
pub use stats::CrawlSummary;
pub use traits::{LinkEvent, OutputError, OutputResult, Recorder};
