//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the scraper, including:
//! - Building the HTTP client with the configured timeout
//! - The preliminary HEAD request that fixes the user agent
//! - GET requests with a fixed retry count

use crate::config::ScraperConfig;
use crate::{FetchError, RosterError};
use reqwest::header::USER_AGENT;
use reqwest::Client;
use std::time::Duration;

/// User agent the client sends before the contact suffix is added
pub const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `timeout` - Per-request timeout
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(DEFAULT_USER_AGENT)
        .timeout(timeout)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Formats the user agent sent with every GET
pub fn user_agent_with_contact(base: &str, contact: &str) -> String {
    format!("{} {}", base, contact)
}

/// Page fetcher with a fixed retry count
///
/// Every GET carries the same `User-Agent` header: the client's default
/// agent followed by the contact string, so the site operators know who
/// to reach.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    user_agent: String,
    retries: u32,
}

impl Fetcher {
    /// Creates a fetcher for the configured roster
    ///
    /// Sends one HEAD request to the roster URL with the default agent. A
    /// connection failure is returned as an error; the status code is only
    /// logged.
    ///
    /// # Arguments
    ///
    /// * `config` - Root URL, timeout and retry count
    /// * `contact` - Text appended to the default user agent
    pub async fn connect(config: &ScraperConfig, contact: &str) -> Result<Self, RosterError> {
        let client = build_http_client(config.timeout())?;

        let response = client
            .head(&config.root_url)
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: config.root_url.clone(),
                source,
            })?;
        tracing::debug!(
            "HEAD {} returned {}",
            config.root_url,
            response.status().as_u16()
        );

        Ok(Self::with_client(
            client,
            user_agent_with_contact(DEFAULT_USER_AGENT, contact),
            config.retries,
        ))
    }

    /// Creates a fetcher from parts without any network traffic
    pub fn with_client(client: Client, user_agent: String, retries: u32) -> Self {
        Self {
            client,
            user_agent,
            retries,
        }
    }

    /// Fetches a page, retrying on any error
    ///
    /// # Retry Logic
    ///
    /// | Condition | Action |
    /// |-----------|--------|
    /// | 2xx | Return body |
    /// | Other status | Retry, up to `retries` extra attempts |
    /// | Network error / timeout | Retry, up to `retries` extra attempts |
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The page body
    /// * `Err(FetchError)` - The error of the last attempt
    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let mut retries_left = self.retries;
        loop {
            match self.fetch_once(url).await {
                Ok(body) => return Ok(body),
                Err(e) if retries_left > 0 => {
                    retries_left -= 1;
                    tracing::debug!("{}; {} retries left", e, retries_left);
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn fetch_once(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|source| FetchError::Request {
            url: url.to_string(),
            source,
        })
    }
}
