//! Configuration module for Clarke-Roster
//!
//! Every setting has a default, so a run needs no file at all. A TOML file
//! can override any subset of them and CLI flags override the file.
//!
//! # Example
//!
//! ```no_run
//! use clarke_roster::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("roster.toml")).unwrap();
//! println!("Scraping {}", config.scraper.root_url);
//! ```

mod parser;
mod types;
mod validation;

pub use types::{Config, OutputConfig, ScraperConfig, UserAgentConfig, DEFAULT_CONTACT};

pub use parser::{load_config, parse_config, read_config};
pub use validation::validate;
