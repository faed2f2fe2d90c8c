//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building the HTTP client with a proper user agent string
//! - GET requests to fetch page content
//! - Error classification into fetch outcomes
//!
//! Failures are per-URL and never abort the crawl; the coordinator turns
//! them into failure records and moves on. No request is retried.

use crate::config::{Config, UserAgentConfig};
use crate::state::TaskState;
use reqwest::Client;
use std::time::Duration;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched an HTML document
    Success {
        /// HTTP status code
        status_code: u16,
        /// Page body content
        body: String,
    },

    /// Fetched something that is not HTML; treated as visited with no links
    NotHtml {
        /// The Content-Type received
        content_type: String,
    },

    /// Server answered with a non-success status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// The request exceeded the configured timeout
    Timeout,

    /// Connection-level failure (DNS, refused connection, TLS)
    Network {
        /// Error description
        error: String,
    },
}

impl FetchResult {
    /// The task state this outcome settles into
    pub fn task_state(&self) -> TaskState {
        match self {
            Self::Success { .. } | Self::NotHtml { .. } => TaskState::Succeeded,
            Self::HttpError { .. } | Self::Timeout | Self::Network { .. } => TaskState::Failed,
        }
    }

    /// Human-readable cause for failure records; None for successes
    pub fn failure_cause(&self) -> Option<String> {
        match self {
            Self::Success { .. } | Self::NotHtml { .. } => None,
            Self::HttpError { status_code } => Some(format!("HTTP {}", status_code)),
            Self::Timeout => Some("request timeout".to_string()),
            Self::Network { error } => Some(error.clone()),
        }
    }
}

/// Formats the user agent string as `name/version (+contact-url; contact-email)`
pub fn format_user_agent(config: &UserAgentConfig) -> String {
    format!(
        "{}/{} (+{}; {})",
        config.crawler_name, config.crawler_version, config.contact_url, config.contact_email
    )
}

/// Builds the HTTP client used for the whole crawl
///
/// The per-request timeout comes from the crawler configuration; a fetch
/// that exceeds it settles the task as Failed.
pub fn build_http_client(config: &Config) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(format_user_agent(&config.user_agent))
        .timeout(Duration::from_millis(config.crawler.fetch_timeout_ms))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and classifies the outcome
///
/// # Outcome mapping
///
/// | Condition | Outcome |
/// |-----------|---------|
/// | 2xx with HTML (or untyped) body | Success |
/// | 2xx with non-HTML Content-Type | NotHtml |
/// | Non-success status | HttpError |
/// | Timeout | Timeout |
/// | Connection/DNS/TLS failure | Network |
pub async fn fetch_url(client: &Client, url: &str) -> FetchResult {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => {
            if e.is_timeout() {
                return FetchResult::Timeout;
            }
            if e.is_connect() {
                return FetchResult::Network {
                    error: format!("connection failed: {}", e),
                };
            }
            return FetchResult::Network {
                error: e.to_string(),
            };
        }
    };

    let status = response.status();
    if !status.is_success() {
        return FetchResult::HttpError {
            status_code: status.as_u16(),
        };
    }

    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    // Servers that send no Content-Type get the benefit of the doubt
    if !content_type.is_empty() && !content_type.contains("text/html") {
        return FetchResult::NotHtml { content_type };
    }

    match response.text().await {
        Ok(body) => FetchResult::Success {
            status_code: status.as_u16(),
            body,
        },
        Err(e) => {
            if e.is_timeout() {
                FetchResult::Timeout
            } else {
                FetchResult::Network {
                    error: e.to_string(),
                }
            }
        }
    }
}
