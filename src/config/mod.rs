//! Configuration module for Listing-Scraper
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key is optional; an empty file yields the default listing run.
//!
//! # Example
//!
//! ```no_run
//! use listing_scraper::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("scraper.toml")).unwrap();
//! println!("Scraping: {}", config.target.base_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, HttpConfig, OutputConfig, TargetConfig, DEFAULT_BASE_URL, DEFAULT_CSV_PATH,
    DEFAULT_JSON_PATH,
};

// Re-export parser functions
pub use parser::{load_config, parse_config};
pub use validation::validate;
