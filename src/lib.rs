//! Clarke-Roster: a jail roster scraper
//!
//! This crate fetches the Athens-Clarke county jail roster, follows each
//! inmate's detail page, validates and normalizes the tables it finds, and
//! writes one timestamped CSV file per run.

pub mod config;
pub mod output;
pub mod parser;
pub mod record;
pub mod scrape;

use thiserror::Error;

/// Main error type for Clarke-Roster operations
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Page format error: {0}")]
    Format(#[from] FormatError),

    #[error("Lookup error: {0}")]
    Lookup(#[from] LookupError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Errors from fetching a single page
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Request { url: String, source: reqwest::Error },

    #[error("HTTP response code for {url} was {status}, expected a success status")]
    Status { url: String, status: u16 },
}

/// A page no longer looks the way the parsers expect it to
///
/// Every variant names the offending value so a site redesign can be
/// diagnosed from the log line alone.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("expected exactly 1 table {context}, found {found}")]
    TableCount { context: String, found: usize },

    #[error("column names have changed: expected {expected:?}, found {found:?}")]
    ColumnsChanged {
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("expected an empty artifact row after the header")]
    MissingArtifactRow,

    #[error("row {row} is missing a value for {column}")]
    MissingValue { row: usize, column: String },

    #[error("non-unique inmate id {0:?}")]
    DuplicateId(String),

    #[error("invalid name format: {0:?}")]
    InvalidName(String),

    #[error("invalid sex format: {0:?}")]
    InvalidSex(String),

    #[error("race not converted to standard format: {0:?}")]
    InvalidRace(String),

    #[error("invalid booking date format: {0:?}")]
    InvalidBookingDate(String),

    #[error("invalid year of birth format: {0:?}")]
    InvalidBirthYear(String),

    #[error("number of detail links ({links}) != number of table entries ({rows})")]
    LinkCount { links: usize, rows: usize },

    #[error("invalid detail link: {0:?}")]
    InvalidLink(String),

    #[error("wrong table dimensions: expected {expected:?}, found {found:?}")]
    TableShape {
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("table format has changed at cell ({row}, {col}): {found:?}")]
    UnexpectedCell {
        row: usize,
        col: usize,
        found: Option<String>,
    },

    #[error("charges table has zero rows")]
    NoCharges,

    #[error("invalid misdemeanor/felony format: {0:?}")]
    InvalidGrade(String),
}

/// Errors from matching a detail page back to its roster row
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LookupError {
    #[error("inmate id {0:?} not found in main page")]
    NotFound(String),

    #[error("inmate id {inmate_id:?} matches {matches} rows")]
    Ambiguous { inmate_id: String, matches: usize },
}

/// Result type alias for Clarke-Roster operations
pub type Result<T> = std::result::Result<T, RosterError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for page parsing
pub type FormatResult<T> = std::result::Result<T, FormatError>;

// Re-export commonly used types
pub use config::Config;
pub use record::{Dataset, DatasetBuilder, InmateDetail, InmateRecord};
pub use output::RunSummary;
pub use scrape::RosterScraper;
