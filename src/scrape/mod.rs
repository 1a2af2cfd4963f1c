//! Scraper module for page fetching and run coordination
//!
//! This module contains the core scraping logic, including:
//! - HTTP fetching with a fixed retry count
//! - Sequencing the roster page, the detail pages and the CSV output

mod coordinator;
mod fetcher;

pub use coordinator::RosterScraper;
pub use fetcher::{build_http_client, user_agent_with_contact, Fetcher, DEFAULT_USER_AGENT};

use crate::config::Config;
use crate::output::RunSummary;
use crate::RosterError;

/// Runs a complete scrape
///
/// This is the main entry point for a run. It will:
/// 1. Validate the configuration and probe the roster host
/// 2. Parse the roster page
/// 3. Merge every detail page
/// 4. Write the CSV file
///
/// # Returns
///
/// * `Ok(RunSummary)` - Run completed, possibly with skipped detail pages
/// * `Err(RosterError)` - Run aborted
pub async fn scrape(config: Config) -> Result<RunSummary, RosterError> {
    RosterScraper::new(config).await?.run().await
}
