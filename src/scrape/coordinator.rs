//! Scrape coordinator - main run orchestration logic
//!
//! A run is strictly sequential:
//! 1. Fetch and parse the roster page (any failure aborts the run)
//! 2. Fetch, parse and merge each detail page in link order, pausing after
//!    every request (failures are logged and the row keeps its sentinel)
//! 3. Freeze the dataset and write the CSV file

use crate::config::{validate, Config};
use crate::output::{write_csv, RunSummary};
use crate::parser::{detail_links, parse_detail, parse_main, MainPageContext};
use crate::record::DatasetBuilder;
use crate::scrape::fetcher::Fetcher;
use crate::{LookupError, RosterError};
use chrono::{Local, NaiveDateTime};
use url::Url;

/// Main scraper structure
pub struct RosterScraper {
    config: Config,
    fetcher: Fetcher,
    root_url: Url,
}

impl RosterScraper {
    /// Creates a new scraper instance
    ///
    /// Validates the configuration and sends the preliminary HEAD request.
    ///
    /// # Returns
    ///
    /// * `Ok(RosterScraper)` - Ready to run
    /// * `Err(RosterError)` - Invalid configuration or unreachable roster host
    pub async fn new(config: Config) -> Result<Self, RosterError> {
        validate(&config)?;
        let root_url = Url::parse(&config.scraper.root_url)?;
        let fetcher = Fetcher::connect(&config.scraper, &config.user_agent.contact).await?;

        Ok(Self {
            config,
            fetcher,
            root_url,
        })
    }

    /// Runs a complete scrape and writes the CSV file
    pub async fn run(&self) -> Result<RunSummary, RosterError> {
        let scraped_at = Local::now().naive_local();

        let (mut builder, links) = self.scrape_main(scraped_at).await?;
        let details_failed = self.scrape_details(&mut builder, &links).await?;
        let dataset = builder.finish();

        let output_path = write_csv(
            &dataset,
            &self.config.output.directory,
            &self.config.output.county_name,
            scraped_at,
        )?;

        let summary = RunSummary {
            records: dataset.len(),
            details_loaded: dataset.detail_count(),
            details_failed,
            output_path,
        };
        summary.log();
        Ok(summary)
    }

    /// Fetches the roster page and resolves its detail links
    ///
    /// # Returns
    ///
    /// * `Ok((DatasetBuilder, Vec<String>))` - Roster rows and one detail URL per row
    /// * `Err(RosterError)` - The roster could not be fetched or has changed format
    pub async fn scrape_main(
        &self,
        scraped_at: NaiveDateTime,
    ) -> Result<(DatasetBuilder, Vec<String>), RosterError> {
        let root = &self.config.scraper.root_url;
        tracing::info!("Fetching roster page {}", root);

        let html = self.fetcher.fetch(root).await?;

        let context = MainPageContext {
            root_url: root.clone(),
            scraped_at,
            county_name: self.config.output.county_name.clone(),
            facility: self.config.output.facility.clone(),
        };
        let builder = parse_main(&html, &context)?;
        let links = detail_links(&html, &self.root_url, builder.len())?;

        Ok((builder, links))
    }

    /// Processes every detail page in order
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - Number of detail pages skipped
    /// * `Err(RosterError)` - A detail page matched more than one row
    pub async fn scrape_details(
        &self,
        builder: &mut DatasetBuilder,
        links: &[String],
    ) -> Result<usize, RosterError> {
        let delay = self.config.scraper.delay();
        let mut failed = 0;

        for (i, link) in links.iter().enumerate() {
            tracing::info!("Downloading subpage {} of {}...", i + 1, links.len());

            match self.scrape_detail(builder, link).await {
                Ok(()) => {}
                Err(e @ RosterError::Lookup(LookupError::Ambiguous { .. })) => return Err(e),
                Err(e) => {
                    tracing::warn!(
                        "Skipping subpage {} ({}): {}. Continuing to next page",
                        i + 1,
                        link,
                        e
                    );
                    failed += 1;
                }
            }

            // Pause after every request, successful or not
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }

        Ok(failed)
    }

    async fn scrape_detail(
        &self,
        builder: &mut DatasetBuilder,
        url: &str,
    ) -> Result<(), RosterError> {
        let html = self.fetcher.fetch(url).await?;
        let detail = parse_detail(&html)?;
        builder.merge_detail(detail, url)?;
        Ok(())
    }
}
