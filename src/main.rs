//! Listing-Scraper main entry point
//!
//! This is the command-line interface for the Listing-Scraper harvester.

use anyhow::Context;
use clap::Parser;
use listing_scraper::config::{load_config, validate, Config};
use listing_scraper::{ScrapeError, ScrapeOutcome, Scraper};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Listing-Scraper: a paginated product listing harvester
///
/// Fetches a product listing, follows its pagination control, and saves
/// every product's name, description and price to CSV and JSON.
/// Without arguments it scrapes the e-commerce test site's laptop listing.
#[derive(Parser, Debug)]
#[command(name = "listing-scraper")]
#[command(version)]
#[command(about = "A paginated product listing harvester", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Listing page to start from (overrides the config file)
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// CSV output path (overrides the config file)
    #[arg(long, value_name = "PATH")]
    csv: Option<String>,

    /// JSON output path (overrides the config file)
    #[arg(long, value_name = "PATH")]
    json: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = build_config(&cli)?;
    tracing::info!("Target listing: {}", config.target.base_url);

    let scraper = Scraper::new(config).context("Failed to initialise scraper")?;

    match scraper.run().await {
        Ok(ScrapeOutcome::Saved {
            batches,
            csv_path,
            json_path,
        }) => {
            println!("{:#?}", batches);
            println!(
                "All data had been saved into {} and {}",
                csv_path.display(),
                json_path.display()
            );
            Ok(ExitCode::SUCCESS)
        }
        Ok(ScrapeOutcome::NoRecords { batches }) => {
            println!("{:#?}", batches);
            println!("No records were collected; nothing was saved");
            Ok(ExitCode::SUCCESS)
        }
        Ok(ScrapeOutcome::NoPagination { url }) => {
            tracing::debug!("No pagination control at {}", url);
            println!("Couldn't get the page");
            Ok(ExitCode::SUCCESS)
        }
        Err(ScrapeError::Output(e)) => {
            tracing::error!("Export failed: {}", e);
            println!("Couldn't save data into the files: {}", e);
            Ok(ExitCode::FAILURE)
        }
        Err(e) => {
            tracing::error!("Scrape failed: {}", e);
            Err(e.into())
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("listing_scraper=info,warn"),
            1 => EnvFilter::new("listing_scraper=debug,info"),
            2 => EnvFilter::new("listing_scraper=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads the config file if given, then applies command-line overrides
fn build_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?
        }
        None => Config::default(),
    };

    if let Some(base_url) = &cli.base_url {
        config.target.base_url = base_url.clone();
    }
    if let Some(csv) = &cli.csv {
        config.output.csv_path = csv.clone();
    }
    if let Some(json) = &cli.json {
        config.output.json_path = json.clone();
    }

    validate(&config).context("Invalid configuration")?;
    Ok(config)
}
