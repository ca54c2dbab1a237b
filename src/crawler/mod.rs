//! Crawler module for listing page fetching and processing
//!
//! This module contains the core scraping logic, including:
//! - HTTP fetching
//! - The page schema holding every structural marker
//! - Pagination link discovery
//! - Product record extraction
//! - Overall run coordination

mod coordinator;
mod extractor;
mod fetcher;
mod pagination;
mod schema;

pub use coordinator::{run_scrape, ScrapeOutcome, Scraper};
pub use extractor::extract_records;
pub use fetcher::{build_http_client, fetch_page, FetchResult};
pub use pagination::{discover_links, origin_of};
pub use schema::{compile, EcommerceSchema, FieldRule, FieldSource, PageSchema};
