use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Contact suffix appended to the HTTP user agent
pub const DEFAULT_CONTACT: &str =
    "(Contact lahoffm@gmail.com, https://github.com/lahoffm/aclu-bail-reform)";

/// Main configuration structure for Clarke-Roster
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scraper: ScraperConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
}

/// Fetching behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Roster page the run starts from; required
    #[serde(rename = "root-url")]
    pub root_url: String,

    /// Per-request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Extra attempts after a failed request
    pub retries: u32,

    /// Pause after every detail page request (seconds)
    #[serde(rename = "delay-secs")]
    pub delay_secs: u64,
}

impl ScraperConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn delay(&self) -> Duration {
        Duration::from_secs(self.delay_secs)
    }
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            root_url: String::new(),
            timeout_secs: 10,
            retries: 0,
            delay_secs: 5,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Text appended to the client's default user agent
    pub contact: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            contact: DEFAULT_CONTACT.to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory the CSV file is written into, relative to the working directory
    pub directory: PathBuf,

    /// Value of the `county_name` column and the file name prefix
    #[serde(rename = "county-name")]
    pub county_name: String,

    /// Value of the `facility` column
    pub facility: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("data"),
            county_name: "athens-clarke".to_string(),
            facility: "Clarke County Jail".to_string(),
        }
    }
}
