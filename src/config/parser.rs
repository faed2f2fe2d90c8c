use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;
use url::Url;

/// Loads and parses a configuration file from the given path
///
/// After parsing and validation, an empty `allowed-domains` list is filled
/// in with the seed's host, so the crawl defaults to staying on the site it
/// started from.
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;

    let mut config: Config = toml::from_str(&content)?;

    validate(&config)?;

    if config.crawler.allowed_domains.is_empty() {
        // Validation guarantees the seed parses and has a host
        let seed = Url::parse(&config.crawler.seed)
            .map_err(|e| ConfigError::InvalidUrl(e.to_string()))?;
        let host = seed
            .host_str()
            .ok_or_else(|| ConfigError::InvalidUrl(config.crawler.seed.clone()))?;
        config.crawler.allowed_domains.push(host.to_lowercase());
    }

    Ok(config)
}

/// Computes a SHA-256 hash of the configuration file content
///
/// Logged at startup so differing crawl logs can be traced back to the
/// configuration that produced them.
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let result = hasher.finalize();
    Ok(hex::encode(result))
}

/// Loads a configuration and returns both the config and its hash
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let config = load_config(path)?;
    let hash = compute_config_hash(path)?;
    Ok((config, hash))
}
