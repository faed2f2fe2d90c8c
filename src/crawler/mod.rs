//! Crawler module for web page fetching and traversal
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with outcome classification
//! - HTML anchor extraction
//! - The traversal engine that owns the frontier and visit ledger

mod coordinator;
mod fetcher;
mod parser;

pub use coordinator::{run_crawl, Coordinator, CrawlTask};
pub use fetcher::{build_http_client, fetch_url, format_user_agent, FetchResult};
pub use parser::{extract_anchors, Anchor};

use crate::config::Config;
use crate::output::{CrawlSummary, Recorder};
use crate::LinktrailError;
use std::sync::Arc;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Seed the frontier with the configured seed URL
/// 2. Fetch pages concurrently, bounded by the configured limit
/// 3. Record every visit, discovered link, and failure
/// 4. Return summary statistics once the frontier drains
pub async fn crawl(
    config: Config,
    recorder: Arc<dyn Recorder>,
) -> Result<CrawlSummary, LinktrailError> {
    run_crawl(config, recorder).await
}
