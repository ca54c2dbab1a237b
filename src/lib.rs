//! Listing-Scraper: a paginated product listing harvester
//!
//! This crate fetches a product listing page, follows its pagination control,
//! extracts one record per product card and exports the aggregate to CSV and JSON.

pub mod config;
pub mod crawler;
pub mod output;
pub mod record;

use thiserror::Error;

/// Main error type for Listing-Scraper operations
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("HTTP status {status_code} for {url}")]
    HttpStatus { url: String, status_code: u16 },

    #[error("Network error for {url}: {error}")]
    Network { url: String, error: String },

    #[error("Extraction failed for {url}: {source}")]
    Extract { url: String, source: ExtractError },

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),
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

/// Structural lookup errors raised while reading a page
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("Source URL has no scheme://host origin: {0}")]
    InvalidSourceUrl(String),

    #[error("Missing {field} element matching '{selector}'")]
    MissingElement { field: String, selector: String },

    #[error("Missing '{attribute}' attribute on {field} element")]
    MissingAttribute { field: String, attribute: String },

    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },
}

/// Result type alias for Listing-Scraper operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for page extraction
pub type ExtractResult<T> = std::result::Result<T, ExtractError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{run_scrape, ScrapeOutcome, Scraper};
pub use record::{PageBatch, ProductRecord};
