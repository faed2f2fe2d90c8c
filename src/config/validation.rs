use crate::config::types::{Config, CrawlerConfig, OutputConfig, UserAgentConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    let seed = Url::parse(&config.seed)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid seed URL '{}': {}", config.seed, e)))?;

    if seed.scheme() != "http" && seed.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "Seed URL must use HTTP or HTTPS scheme, got '{}'",
            seed.scheme()
        )));
    }

    if seed.host_str().is_none() {
        return Err(ConfigError::Validation(format!(
            "Seed URL '{}' has no host",
            config.seed
        )));
    }

    for pattern in &config.allowed_domains {
        validate_domain_pattern(pattern)?;
    }

    if config.max_concurrent_fetches < 1 || config.max_concurrent_fetches > 100 {
        return Err(ConfigError::Validation(format!(
            "max_concurrent_fetches must be between 1 and 100, got {}",
            config.max_concurrent_fetches
        )));
    }

    if config.fetch_timeout_ms < 100 {
        return Err(ConfigError::Validation(format!(
            "fetch_timeout_ms must be >= 100ms, got {}ms",
            config.fetch_timeout_ms
        )));
    }

    Ok(())
}

/// Validates a domain pattern: a bare host, optionally prefixed with "*."
fn validate_domain_pattern(pattern: &str) -> Result<(), ConfigError> {
    let host = pattern.strip_prefix("*.").unwrap_or(pattern);

    if host.is_empty() {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain pattern '{}' has no host part",
            pattern
        )));
    }

    if host.contains('/') || host.contains(':') || host.contains('*') {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain pattern '{}' must be a bare host, not a URL",
            pattern
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    validate_email(&config.contact_email)?;

    Ok(())
}

/// Basic email validation: one '@' with non-empty local part and dotted domain
fn validate_email(email: &str) -> Result<(), ConfigError> {
    let parts: Vec<&str> = email.split('@').collect();

    if parts.len() != 2 || parts[0].is_empty() || !parts[1].contains('.') {
        return Err(ConfigError::Validation(format!(
            "Invalid contact_email: '{}'",
            email
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.log_path.is_empty() {
        return Err(ConfigError::Validation(
            "log_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::CrawlerConfig;

    fn test_config() -> Config {
        Config {
            crawler: CrawlerConfig {
                seed: "https://example.com/".to_string(),
                allowed_domains: vec!["example.com".to_string()],
                max_concurrent_fetches: 8,
                fetch_timeout_ms: 30_000,
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

    #[test]
    fn test_valid_config() {
        assert!(validate(&test_config()).is_ok());
    }

    #[test]
    fn test_invalid_seed_url() {
        let mut config = test_config();
        config.crawler.seed = "not a url".to_string();
        assert!(matches!(
            validate(&config).unwrap_err(),
            ConfigError::InvalidUrl(_)
        ));
    }

    #[test]
    fn test_seed_requires_http_scheme() {
        let mut config = test_config();
        config.crawler.seed = "ftp://example.com/".to_string();
        assert!(matches!(
            validate(&config).unwrap_err(),
            ConfigError::Validation(_)
        ));
    }

    #[test]
    fn test_empty_allowed_domains_is_valid() {
        let mut config = test_config();
        config.crawler.allowed_domains.clear();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_wildcard_pattern_is_valid() {
        let mut config = test_config();
        config.crawler.allowed_domains = vec!["*.example.com".to_string()];
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_pattern_with_scheme_rejected() {
        let mut config = test_config();
        config.crawler.allowed_domains = vec!["https://example.com".to_string()];
        assert!(matches!(
            validate(&config).unwrap_err(),
            ConfigError::InvalidPattern(_)
        ));
    }

    #[test]
    fn test_pattern_with_path_rejected() {
        let mut config = test_config();
        config.crawler.allowed_domains = vec!["example.com/path".to_string()];
        assert!(matches!(
            validate(&config).unwrap_err(),
            ConfigError::InvalidPattern(_)
        ));
    }

    #[test]
    fn test_bare_wildcard_rejected() {
        let mut config = test_config();
        config.crawler.allowed_domains = vec!["*.".to_string()];
        assert!(matches!(
            validate(&config).unwrap_err(),
            ConfigError::InvalidPattern(_)
        ));
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let mut config = test_config();
        config.crawler.max_concurrent_fetches = 0;
        assert!(matches!(
            validate(&config).unwrap_err(),
            ConfigError::Validation(_)
        ));
    }

    #[test]
    fn test_tiny_timeout_rejected() {
        let mut config = test_config();
        config.crawler.fetch_timeout_ms = 10;
        assert!(matches!(
            validate(&config).unwrap_err(),
            ConfigError::Validation(_)
        ));
    }

    #[test]
    fn test_crawler_name_with_spaces_rejected() {
        let mut config = test_config();
        config.user_agent.crawler_name = "Test Crawler".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_bad_email_rejected() {
        let mut config = test_config();
        config.user_agent.contact_email = "not-an-email".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_empty_log_path_rejected() {
        let mut config = test_config();
        config.output.log_path = String::new();
        assert!(validate(&config).is_err());
    }
}
