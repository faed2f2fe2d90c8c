//! Crawler coordinator - the traversal engine
//!
//! This module contains the main crawl loop that coordinates all aspects
//! of the crawl:
//! - Seeding and owning the frontier queue and visit ledger
//! - Dispatching fetches into a bounded worker set
//! - Resolving, filtering, and deduplicating discovered links
//! - Reporting every visit, link, and failure to the recorder
//!
//! The coordinator task is the only owner of the ledger and frontier, and
//! the only caller of the recorder, so discovery of the same URL from
//! concurrent fetches still funnels through one claim per URL and records
//! stay ordered.

use crate::config::Config;
use crate::crawler::fetcher::{build_http_client, fetch_url, FetchResult};
use crate::crawler::parser::{extract_anchors, Anchor};
use crate::output::{CrawlSummary, LinkEvent, Recorder};
use crate::state::{TaskState, VisitLedger};
use crate::url::{extract_host, resolve_href, DomainFilter};
use crate::{LinktrailError, UrlError};
use reqwest::Client;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::task::JoinSet;
use url::Url;

/// A single canonical URL pending a fetch
#[derive(Debug, Clone)]
pub struct CrawlTask {
    /// The canonical URL to fetch
    pub url: Url,

    /// Where the task is in its lifecycle
    pub state: TaskState,
}

impl CrawlTask {
    fn new(url: Url) -> Self {
        Self {
            url,
            state: TaskState::Pending,
        }
    }

    fn advance(&mut self, next: TaskState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "illegal task transition {} -> {} for {}",
            self.state,
            next,
            self.url
        );
        tracing::trace!("{}: {} -> {}", self.url, self.state, next);
        self.state = next;
    }
}

/// Main crawler coordinator structure
///
/// Owns all mutable crawl state for one run. Nothing here is process-wide:
/// two coordinators in one process crawl independently.
pub struct Coordinator {
    config: Config,
    client: Client,
    filter: DomainFilter,
    ledger: VisitLedger,
    frontier: VecDeque<CrawlTask>,
    recorder: Arc<dyn Recorder>,
    summary: CrawlSummary,
}

impl Coordinator {
    /// Creates a new coordinator and seeds the frontier
    ///
    /// The seed URL is canonicalized (fragment stripped) and claimed in the
    /// ledger before it is enqueued, like any other task. When the config
    /// names no allowed domains, the crawl is scoped to the seed's host.
    pub fn new(config: Config, recorder: Arc<dyn Recorder>) -> Result<Self, LinktrailError> {
        let mut seed = Url::parse(&config.crawler.seed)?;
        seed.set_fragment(None);

        let seed_host = extract_host(&seed).ok_or(UrlError::MissingHost)?;

        let mut patterns = config.crawler.allowed_domains.clone();
        if patterns.is_empty() {
            patterns.push(seed_host);
        }
        let filter = DomainFilter::new(patterns);

        let client = build_http_client(&config)?;

        let mut ledger = VisitLedger::new();
        let mut frontier = VecDeque::new();
        ledger.try_claim(&seed);
        frontier.push_back(CrawlTask::new(seed));

        Ok(Self {
            config,
            client,
            filter,
            ledger,
            frontier,
            recorder,
            summary: CrawlSummary::new(),
        })
    }

    /// Runs the crawl to completion
    ///
    /// Dispatches frontier tasks into a bounded set of concurrent fetches
    /// and settles each one as it finishes. The frontier is FIFO, so
    /// dispatch order is breadth-first: discovery order across the
    /// frontier. The crawl is complete when the frontier is empty and no
    /// fetch is in flight.
    pub async fn run(&mut self) -> Result<CrawlSummary, LinktrailError> {
        tracing::info!(
            "Starting crawl from {} (allowed: {})",
            self.config.crawler.seed,
            self.filter.patterns().join(", ")
        );

        let start_time = std::time::Instant::now();
        let max_concurrent = self.config.crawler.max_concurrent_fetches as usize;
        let mut in_flight: JoinSet<(CrawlTask, FetchResult)> = JoinSet::new();

        loop {
            // Keep the worker set full while there is queued work
            while in_flight.len() < max_concurrent {
                let Some(mut task) = self.frontier.pop_front() else {
                    break;
                };
                task.advance(TaskState::Fetching);
                tracing::debug!("Fetching {}", task.url);

                let client = self.client.clone();
                in_flight.spawn(async move {
                    let result = fetch_url(&client, task.url.as_str()).await;
                    (task, result)
                });
            }

            // Frontier empty and nothing in flight: the crawl is done
            let Some(joined) = in_flight.join_next().await else {
                break;
            };
            let (task, result) = joined?;
            self.settle(task, result)?;

            let settled = self.summary.total_pages();
            if settled % 25 == 0 {
                let rate = settled as f64 / start_time.elapsed().as_secs_f64();
                tracing::info!(
                    "Progress: {} pages settled, {} in frontier, {:.2} pages/sec",
                    settled,
                    self.frontier.len(),
                    rate
                );
            }
        }

        tracing::info!(
            "Crawl complete: {} pages ({} failed), {} links in {:?}",
            self.summary.total_pages(),
            self.summary.pages_failed,
            self.summary.links_found,
            start_time.elapsed()
        );

        Ok(self.summary.clone())
    }

    /// Settles a finished fetch: records the outcome and, on success,
    /// processes every anchor the page yielded
    fn settle(&mut self, mut task: CrawlTask, result: FetchResult) -> Result<(), LinktrailError> {
        let outcome = result.task_state();
        task.advance(outcome);
        self.summary.tally_task(outcome);

        match result {
            FetchResult::Success { body, .. } => {
                self.recorder.record_visit(&task.url)?;
                for anchor in extract_anchors(&body) {
                    self.process_anchor(&task.url, anchor)?;
                }
            }

            FetchResult::NotHtml { content_type } => {
                // Fetched, just nothing to extract from it
                self.recorder.record_visit(&task.url)?;
                tracing::debug!("No anchors extracted from {} ({})", task.url, content_type);
            }

            failed => {
                let cause = failed.failure_cause().unwrap_or_default();
                tracing::warn!("Fetch failed for {}: {}", task.url, cause);
                self.recorder.record_failure(&task.url, &cause)?;
            }
        }

        task.advance(TaskState::Drained);
        Ok(())
    }

    /// Handles one discovered anchor
    ///
    /// The link event is recorded unconditionally. Follow-through takes
    /// the full gauntlet: the href must resolve, the target must be in an
    /// allowed domain, and the ledger claim must be the first for that
    /// canonical URL.
    fn process_anchor(&mut self, source: &Url, anchor: Anchor) -> Result<(), LinktrailError> {
        let resolved = if anchor.href.trim().is_empty() {
            // Empty hrefs are recorded but never followed
            None
        } else {
            match resolve_href(source, &anchor.href) {
                Ok(url) => Some(url),
                Err(e) => {
                    tracing::debug!("Not following {:?} on {}: {}", anchor.href, source, e);
                    self.summary.links_unresolved += 1;
                    None
                }
            }
        };

        let event = LinkEvent {
            source: source.clone(),
            text: anchor.text,
            raw_href: anchor.href,
            resolved,
        };
        self.recorder.record_link(&event)?;
        self.summary.links_found += 1;

        let Some(target) = event.resolved else {
            return Ok(());
        };

        if !self.filter.is_allowed(&target) {
            tracing::debug!("Off-site link not followed: {}", target);
            self.summary.links_offsite += 1;
            return Ok(());
        }

        if self.ledger.try_claim(&target) {
            self.summary.links_followed += 1;
            self.frontier.push_back(CrawlTask::new(target));
        }

        Ok(())
    }
}

/// Runs a complete crawl with the given configuration and recorder
///
/// # Example
///
/// ```no_run
/// use linktrail::config::load_config;
/// use linktrail::crawler::run_crawl;
/// use linktrail::output::FileRecorder;
/// use std::path::Path;
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("config.toml"))?;
/// let recorder = Arc::new(FileRecorder::create(Path::new(&config.output.log_path))?);
/// let summary = run_crawl(config, recorder).await?;
/// println!("{}", summary);
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(
    config: Config,
    recorder: Arc<dyn Recorder>,
) -> Result<CrawlSummary, LinktrailError> {
    let mut coordinator = Coordinator::new(config, recorder)?;
    coordinator.run().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CrawlerConfig, OutputConfig, UserAgentConfig};
    use crate::output::OutputResult;
    use std::sync::Mutex;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Recorder that keeps every record in memory for assertions
    #[derive(Debug, Default)]
    struct MemoryRecorder {
        records: Mutex<Vec<String>>,
    }

    impl MemoryRecorder {
        fn records(&self) -> Vec<String> {
            self.records.lock().unwrap().clone()
        }

        fn visits(&self) -> Vec<String> {
            self.with_prefix("visit ")
        }

        fn links(&self) -> Vec<String> {
            self.with_prefix("link ")
        }

        fn failures(&self) -> Vec<String> {
            self.with_prefix("fail ")
        }

        fn with_prefix(&self, prefix: &str) -> Vec<String> {
            self.records()
                .into_iter()
                .filter(|r| r.starts_with(prefix))
                .collect()
        }
    }

    impl Recorder for MemoryRecorder {
        fn record_visit(&self, url: &Url) -> OutputResult<()> {
            self.records.lock().unwrap().push(format!("visit {}", url));
            Ok(())
        }

        fn record_link(&self, event: &LinkEvent) -> OutputResult<()> {
            self.records
                .lock()
                .unwrap()
                .push(format!("link {} -> {}", event.source, event.target()));
            Ok(())
        }

        fn record_failure(&self, url: &Url, cause: &str) -> OutputResult<()> {
            self.records
                .lock()
                .unwrap()
                .push(format!("fail {} ({})", url, cause));
            Ok(())
        }
    }

    fn test_config(seed: String) -> Config {
        Config {
            crawler: CrawlerConfig {
                seed,
                allowed_domains: vec![],
                max_concurrent_fetches: 4,
                fetch_timeout_ms: 5000,
            },
            user_agent: UserAgentConfig {
                crawler_name: "TestCrawler".to_string(),
                crawler_version: "1.0".to_string(),
                contact_url: "https://example.com/about".to_string(),
                contact_email: "admin@example.com".to_string(),
            },
            output: OutputConfig {
                log_path: "./crawl.log".to_string(),
            },
        }
    }

    async fn serve_html(server: &MockServer, page_path: &str, body: String) {
        Mock::given(method("GET"))
            .and(path(page_path))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw(body.into_bytes(), "text/html"),
            )
            .mount(server)
            .await;
    }

    async fn run_against(server: &MockServer) -> (CrawlSummary, Arc<MemoryRecorder>) {
        let recorder = Arc::new(MemoryRecorder::default());
        let config = test_config(format!("{}/", server.uri()));
        let summary = run_crawl(config, recorder.clone()).await.expect("crawl failed");
        (summary, recorder)
    }

    #[tokio::test]
    async fn test_visits_seed_and_follows_links() {
        let server = MockServer::start().await;
        serve_html(
            &server,
            "/",
            r#"<html><body><a href="/a">A</a><a href="/b">B</a></body></html>"#.to_string(),
        )
        .await;
        serve_html(&server, "/a", "<html><body>a</body></html>".to_string()).await;
        serve_html(&server, "/b", "<html><body>b</body></html>".to_string()).await;

        let (summary, recorder) = run_against(&server).await;

        assert_eq!(summary.pages_visited, 3);
        assert_eq!(summary.pages_failed, 0);
        assert_eq!(summary.links_found, 2);
        assert_eq!(summary.links_followed, 2);
        assert_eq!(recorder.visits().len(), 3);
    }

    #[tokio::test]
    async fn test_duplicate_links_visited_once() {
        let server = MockServer::start().await;
        let base = server.uri();

        // Two distinct anchors resolving to the same canonical URL
        serve_html(
            &server,
            "/",
            format!(
                r#"<html><body><a href="/a">relative</a><a href="{}/a">absolute</a></body></html>"#,
                base
            ),
        )
        .await;

        Mock::given(method("GET"))
            .and(path("/a"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("<html><body>a</body></html>")
                    .insert_header("content-type", "text/html"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let (summary, recorder) = run_against(&server).await;

        // Both anchors produce link events, the target is fetched once
        assert_eq!(summary.links_found, 2);
        assert_eq!(summary.links_followed, 1);
        assert_eq!(summary.pages_visited, 2);

        let target = format!("visit {}/a", base);
        let visit_count = recorder.visits().iter().filter(|v| **v == target).count();
        assert_eq!(visit_count, 1);
    }

    #[tokio::test]
    async fn test_offsite_link_recorded_not_followed() {
        let server = MockServer::start().await;
        serve_html(
            &server,
            "/",
            r#"<html><body><a href="https://other.invalid/x">Elsewhere</a></body></html>"#
                .to_string(),
        )
        .await;

        let (summary, recorder) = run_against(&server).await;

        assert_eq!(summary.pages_visited, 1);
        assert_eq!(summary.links_found, 1);
        assert_eq!(summary.links_offsite, 1);
        assert_eq!(summary.links_followed, 0);

        assert_eq!(recorder.links().len(), 1);
        assert!(recorder.links()[0].ends_with("https://other.invalid/x"));
        assert!(recorder
            .visits()
            .iter()
            .all(|v| !v.contains("other.invalid")));
    }

    #[tokio::test]
    async fn test_cyclic_graph_terminates() {
        let server = MockServer::start().await;
        serve_html(
            &server,
            "/",
            r#"<html><body><a href="/a">down</a></body></html>"#.to_string(),
        )
        .await;
        // /a links back to the root and to itself
        serve_html(
            &server,
            "/a",
            r#"<html><body><a href="/">up</a><a href="/a">self</a></body></html>"#.to_string(),
        )
        .await;

        let (summary, recorder) = run_against(&server).await;

        assert_eq!(summary.pages_visited, 2);
        assert_eq!(summary.links_found, 3);
        assert_eq!(recorder.visits().len(), 2);
    }

    #[tokio::test]
    async fn test_failed_fetch_does_not_abort_crawl() {
        let server = MockServer::start().await;
        serve_html(
            &server,
            "/",
            r#"<html><body><a href="/missing">gone</a><a href="/ok">ok</a></body></html>"#
                .to_string(),
        )
        .await;
        serve_html(&server, "/ok", "<html><body>ok</body></html>".to_string()).await;
        // /missing is not mounted; wiremock answers 404

        let (summary, recorder) = run_against(&server).await;

        assert_eq!(summary.pages_visited, 2);
        assert_eq!(summary.pages_failed, 1);
        assert_eq!(recorder.failures().len(), 1);
        assert!(recorder.failures()[0].contains("HTTP 404"));
        assert!(recorder.visits().iter().any(|v| v.ends_with("/ok")));
    }

    #[tokio::test]
    async fn test_failing_seed_terminates_cleanly() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let (summary, recorder) = run_against(&server).await;

        assert_eq!(summary.pages_visited, 0);
        assert_eq!(summary.pages_failed, 1);
        assert_eq!(summary.links_found, 0);
        assert_eq!(recorder.visits().len(), 0);
        assert_eq!(recorder.links().len(), 0);
        assert_eq!(recorder.failures().len(), 1);
        assert!(recorder.failures()[0].contains("HTTP 500"));
    }

    #[tokio::test]
    async fn test_unresolvable_href_recorded_not_followed() {
        let server = MockServer::start().await;
        serve_html(
            &server,
            "/",
            r#"<html><body><a href="mailto:hi@example.com">Mail</a></body></html>"#.to_string(),
        )
        .await;

        let (summary, recorder) = run_against(&server).await;

        assert_eq!(summary.pages_visited, 1);
        assert_eq!(summary.links_found, 1);
        assert_eq!(summary.links_unresolved, 1);
        assert_eq!(summary.links_followed, 0);
        assert!(recorder.links()[0].ends_with("mailto:hi@example.com"));
    }

    #[tokio::test]
    async fn test_fragment_variants_visited_once() {
        let server = MockServer::start().await;
        serve_html(
            &server,
            "/",
            r#"<html><body><a href="/page#a">first</a><a href="/page#b">second</a></body></html>"#
                .to_string(),
        )
        .await;
        serve_html(&server, "/page", "<html><body>page</body></html>".to_string()).await;

        let (summary, recorder) = run_against(&server).await;

        assert_eq!(summary.links_found, 2);
        assert_eq!(summary.links_followed, 1);
        assert_eq!(summary.pages_visited, 2);
        assert_eq!(
            recorder
                .visits()
                .iter()
                .filter(|v| v.ends_with("/page"))
                .count(),
            1
        );
    }

    #[tokio::test]
    async fn test_empty_href_recorded_not_followed() {
        let server = MockServer::start().await;
        serve_html(
            &server,
            "/",
            r#"<html><body><a href="">blank</a></body></html>"#.to_string(),
        )
        .await;

        let (summary, recorder) = run_against(&server).await;

        assert_eq!(summary.pages_visited, 1);
        assert_eq!(summary.links_found, 1);
        assert_eq!(summary.links_followed, 0);
        assert_eq!(recorder.links().len(), 1);
    }

    #[tokio::test]
    async fn test_non_html_page_visited_without_links() {
        let server = MockServer::start().await;
        serve_html(
            &server,
            "/",
            r#"<html><body><a href="/data.json">data</a></body></html>"#.to_string(),
        )
        .await;
        Mock::given(method("GET"))
            .and(path("/data.json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{"a": "/not-a-link"}"#)
                    .insert_header("content-type", "application/json"),
            )
            .mount(&server)
            .await;

        let (summary, recorder) = run_against(&server).await;

        assert_eq!(summary.pages_visited, 2);
        assert_eq!(summary.links_found, 1);
        assert_eq!(recorder.visits().len(), 2);
    }
}
