//! Scrape coordinator - the run's driver
//!
//! One run walks these steps in order, each page fully handled before the
//! next request is sent:
//! - Fetch the base listing page
//! - Discover the pagination links
//! - Fetch and extract every linked page
//! - Export the flattened records

use crate::config::Config;
use crate::crawler::extractor::extract_records;
use crate::crawler::pagination::discover_links;
use crate::crawler::schema::{EcommerceSchema, PageSchema};
use crate::crawler::{build_http_client, fetch_page};
use crate::output::export_batches;
use crate::record::{total_records, PageBatch};
use crate::{ExtractError, ScrapeError};
use reqwest::Client;
use std::path::PathBuf;

/// How a completed run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrapeOutcome {
    /// The base page had no pagination control; nothing was scraped
    NoPagination { url: String },

    /// Every page was visited but none yielded a record; nothing was written
    NoRecords { batches: Vec<PageBatch> },

    /// Records were written to both export files
    Saved {
        batches: Vec<PageBatch>,
        csv_path: PathBuf,
        json_path: PathBuf,
    },
}

/// Main scraper structure
pub struct Scraper {
    config: Config,
    client: Client,
    schema: Box<dyn PageSchema>,
}

impl Scraper {
    /// Creates a scraper for the e-commerce listing schema
    ///
    /// # Returns
    ///
    /// * `Ok(Scraper)` - Ready to run
    /// * `Err(ScrapeError)` - The HTTP client or schema could not be built
    pub fn new(config: Config) -> Result<Self, ScrapeError> {
        let schema = EcommerceSchema::new().map_err(|source| ScrapeError::Extract {
            url: config.target.base_url.clone(),
            source,
        })?;
        Self::with_schema(config, Box::new(schema))
    }

    /// Creates a scraper reading pages with a custom schema
    pub fn with_schema(config: Config, schema: Box<dyn PageSchema>) -> Result<Self, ScrapeError> {
        let client = build_http_client(&config.http)?;
        Ok(Self {
            config,
            client,
            schema,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Fetches and extracts every listing page
    ///
    /// # Returns
    ///
    /// * `Ok(None)` - The base page has no pagination control
    /// * `Ok(Some(batches))` - One batch per visited URL, in visitation order
    /// * `Err(ScrapeError)` - A fetch or an extraction failed; the run stops there
    pub async fn collect(&self) -> Result<Option<Vec<PageBatch>>, ScrapeError> {
        let base_url = self.config.target.base_url.as_str();
        tracing::info!("Fetching base listing page: {}", base_url);

        let html = fetch_page(&self.client, base_url).await.into_body(base_url)?;
        let links = discover_links(&html, base_url, self.schema.as_ref())
            .map_err(|source| extract_error(base_url, source))?;

        if links.is_empty() {
            tracing::warn!("No pagination control found on {}", base_url);
            return Ok(None);
        }

        tracing::info!("Discovered {} pages to scrape", links.len());

        let mut batches = Vec::with_capacity(links.len());
        for (index, link) in links.iter().enumerate() {
            let html = fetch_page(&self.client, link).await.into_body(link)?;
            let records = extract_records(&html, self.schema.as_ref())
                .map_err(|source| extract_error(link, source))?;

            tracing::info!(
                "[{}/{}] {} records from {}",
                index + 1,
                links.len(),
                records.len(),
                link
            );
            batches.push(PageBatch::new(link.as_str(), records));
        }

        Ok(Some(batches))
    }

    /// Runs the full scrape and export
    pub async fn run(&self) -> Result<ScrapeOutcome, ScrapeError> {
        let Some(batches) = self.collect().await? else {
            return Ok(ScrapeOutcome::NoPagination {
                url: self.config.target.base_url.clone(),
            });
        };

        tracing::info!(
            "Collected {} records from {} pages",
            total_records(&batches),
            batches.len()
        );

        if !export_batches(&batches, &self.config.output)? {
            return Ok(ScrapeOutcome::NoRecords { batches });
        }

        Ok(ScrapeOutcome::Saved {
            batches,
            csv_path: PathBuf::from(&self.config.output.csv_path),
            json_path: PathBuf::from(&self.config.output.json_path),
        })
    }
}

fn extract_error(url: &str, source: ExtractError) -> ScrapeError {
    ScrapeError::Extract {
        url: url.to_string(),
        source,
    }
}

/// Runs one scrape with the given configuration
///
/// # Example
///
/// ```no_run
/// use listing_scraper::{run_scrape, Config, ScrapeOutcome};
///
/// # async fn example() -> listing_scraper::Result<()> {
/// match run_scrape(Config::default()).await? {
///     ScrapeOutcome::Saved { csv_path, .. } => println!("Wrote {}", csv_path.display()),
///     other => println!("Nothing saved: {:?}", other),
/// }
/// # Ok(())
/// # }
/// ```
pub async fn run_scrape(config: Config) -> Result<ScrapeOutcome, ScrapeError> {
    Scraper::new(config)?.run().await
}
