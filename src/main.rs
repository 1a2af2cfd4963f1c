//! Clarke-Roster main entry point
//!
//! This is the command-line interface for the Clarke-Roster scraper.

use anyhow::Context;
use clap::Parser;
use clarke_roster::config::{read_config, validate, Config};
use clarke_roster::scrape::scrape;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Clarke-Roster: a jail roster scraper
///
/// Fetches the current inmate roster, follows every inmate's detail page and
/// writes the combined data to a timestamped CSV file.
#[derive(Parser, Debug)]
#[command(name = "clarke-roster")]
#[command(version)]
#[command(about = "Scrapes the county jail roster into a CSV file", long_about = None)]
struct Cli {
    /// Optional TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Roster page URL
    #[arg(long, value_name = "URL")]
    url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Extra attempts after a failed request
    #[arg(long, value_name = "N")]
    retries: Option<u32>,

    /// Pause after every detail page request, in seconds
    #[arg(long, value_name = "SECS")]
    delay: Option<u64>,

    /// Directory the CSV file is written into
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate the configuration and show what would be scraped without any network traffic
    #[arg(long)]
    dry_run: bool,
}

impl Cli {
    /// Applies command-line overrides on top of a base configuration
    fn apply_overrides(&self, mut config: Config) -> Config {
        if let Some(url) = &self.url {
            config.scraper.root_url = url.clone();
        }
        if let Some(timeout) = self.timeout {
            config.scraper.timeout_secs = timeout;
        }
        if let Some(retries) = self.retries {
            config.scraper.retries = retries;
        }
        if let Some(delay) = self.delay {
            config.scraper.delay_secs = delay;
        }
        if let Some(dir) = &self.output_dir {
            config.output.directory = dir.clone();
        }
        config
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let base = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            read_config(path)
                .with_context(|| format!("failed to load {}", path.display()))?
        }
        None => Config::default(),
    };
    let config = cli.apply_overrides(base);
    validate(&config).context("invalid configuration")?;

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    let summary = scrape(config).await.context("scrape failed")?;
    println!("Wrote {}", summary.output_path.display());
    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("clarke_roster=info,warn"),
            1 => EnvFilter::new("clarke_roster=debug,info"),
            2 => EnvFilter::new("clarke_roster=trace,debug"),
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

/// Handles the --dry-run mode: shows the effective configuration
fn handle_dry_run(config: &Config) {
    println!("=== Clarke-Roster Dry Run ===\n");

    println!("Scraper Configuration:");
    println!("  Roster URL: {}", config.scraper.root_url);
    println!("  Timeout: {}s", config.scraper.timeout_secs);
    println!("  Retries: {}", config.scraper.retries);
    println!("  Delay between detail pages: {}s", config.scraper.delay_secs);

    println!("\nUser Agent:");
    println!("  Contact: {}", config.user_agent.contact);

    println!("\nOutput:");
    println!("  Directory: {}", config.output.directory.display());
    println!("  County: {}", config.output.county_name);
    println!("  Facility: {}", config.output.facility);

    println!("\n✓ Configuration is valid");
}
