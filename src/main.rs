//! Linktrail main entry point
//!
//! This is the command-line interface for the Linktrail site crawler.

use anyhow::Context;
use clap::Parser;
use linktrail::config::load_config_with_hash;
use linktrail::crawler::crawl;
use linktrail::output::FileRecorder;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Linktrail: a same-domain site crawler
///
/// Linktrail starts at a seed URL and visits every page reachable within
/// the allowed domains, writing one line per visited page and per
/// discovered link to an append-only log.
#[derive(Parser, Debug)]
#[command(name = "linktrail")]
#[command(version)]
#[command(about = "A same-domain site crawler with a durable link log", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load configuration {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    // The log sink is the one fatal resource: without it there is nothing
    // to crawl into
    let log_path = config.output.log_path.clone();
    let recorder = FileRecorder::create(Path::new(&log_path))
        .with_context(|| format!("cannot open output log {}", log_path))?;

    let summary = crawl(config, Arc::new(recorder))
        .await
        .context("crawl failed")?;

    println!();
    println!("{}", summary);
    println!("\nData saved to {}", log_path);

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("linktrail=info,warn"),
            1 => EnvFilter::new("linktrail=debug,info"),
            2 => EnvFilter::new("linktrail=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows what would be crawled
fn handle_dry_run(config: &linktrail::config::Config) {
    println!("=== Linktrail Dry Run ===\n");

    println!("Crawl:");
    println!("  Seed: {}", config.crawler.seed);
    println!("  Allowed domains:");
    for pattern in &config.crawler.allowed_domains {
        println!("    - {}", pattern);
    }
    println!(
        "  Max concurrent fetches: {}",
        config.crawler.max_concurrent_fetches
    );
    println!("  Fetch timeout: {}ms", config.crawler.fetch_timeout_ms);

    println!("\nUser Agent:");
    println!("  Name: {}", config.user_agent.crawler_name);
    println!("  Version: {}", config.user_agent.crawler_version);
    println!("  Contact URL: {}", config.user_agent.contact_url);
    println!("  Contact Email: {}", config.user_agent.contact_email);

    println!("\nOutput:");
    println!("  Log: {}", config.output.log_path);

    println!("\n✓ Configuration is valid");
}
