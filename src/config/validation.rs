use crate::config::types::{Config, OutputConfig, ScraperConfig, UserAgentConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_scraper_config(&config.scraper)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates fetching configuration
fn validate_scraper_config(config: &ScraperConfig) -> Result<(), ConfigError> {
    if config.root_url.is_empty() {
        return Err(ConfigError::InvalidUrl("root-url is required".to_string()));
    }

    let url = Url::parse(&config.root_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid root-url: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "root-url '{}' must use http or https",
            config.root_url
        )));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout-secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    // retries and delay-secs may be zero

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.contact.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent contact cannot be empty".to_string(),
        ));
    }

    if config.contact.chars().any(|c| c.is_control()) {
        return Err(ConfigError::Validation(
            "user-agent contact cannot contain control characters".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.directory.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "output directory cannot be empty".to_string(),
        ));
    }

    if config.county_name.is_empty() {
        return Err(ConfigError::Validation(
            "county-name cannot be empty".to_string(),
        ));
    }

    // county-name ends up in the file name
    if config
        .county_name
        .chars()
        .any(|c| c == '/' || c == '\\' || c.is_whitespace())
    {
        return Err(ConfigError::Validation(format!(
            "county-name must not contain path separators or whitespace, got '{}'",
            config.county_name
        )));
    }

    Ok(())
}
