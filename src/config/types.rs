use serde::Deserialize;

/// Main configuration structure for Linktrail
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Absolute URL the crawl starts from
    pub seed: String,

    /// Host patterns the crawl is allowed to visit, e.g. "example.com" or
    /// "*.example.com". An empty list scopes the crawl to the seed's host.
    #[serde(rename = "allowed-domains", default)]
    pub allowed_domains: Vec<String>,

    /// Maximum number of pages fetched concurrently
    #[serde(
        rename = "max-concurrent-fetches",
        default = "default_max_concurrent_fetches"
    )]
    pub max_concurrent_fetches: u32,

    /// Per-request timeout in milliseconds; a fetch exceeding it counts as failed
    #[serde(rename = "fetch-timeout-ms", default = "default_fetch_timeout_ms")]
    pub fetch_timeout_ms: u64,
}

fn default_max_concurrent_fetches() -> u32 {
    8
}

fn default_fetch_timeout_ms() -> u64 {
    30_000
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the append-only crawl log
    #[serde(rename = "log-path")]
    pub log_path: String,
}
