//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the scraper:
//! - Building the HTTP client with the configured user agent and timeout
//! - Single GET requests for listing pages
//! - Classifying the outcome as success, HTTP error or network error
//!
//! There is no retry logic. A page is either fetched with status 200 or the
//! run fails with an error naming the cause.

use crate::config::HttpConfig;
use crate::ScrapeError;
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// Page fetched with status 200
    Success {
        /// Final URL after redirects
        final_url: String,
        /// Page body content
        body: String,
    },

    /// Server answered with a status other than 200
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (connection refused, timeout, body read failure)
    NetworkError {
        /// Error description
        error: String,
    },
}

impl FetchResult {
    /// Returns the page body, or the error matching the failure variant
    ///
    /// # Arguments
    ///
    /// * `url` - The requested URL, recorded in the error
    pub fn into_body(self, url: &str) -> Result<String, ScrapeError> {
        match self {
            Self::Success { final_url, body } => {
                if final_url != url {
                    tracing::info!("{} redirected to {}", url, final_url);
                }
                Ok(body)
            }
            Self::HttpError { status_code } => Err(ScrapeError::HttpStatus {
                url: url.to_string(),
                status_code,
            }),
            Self::NetworkError { error } => Err(ScrapeError::Network {
                url: url.to_string(),
                error,
            }),
        }
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The HTTP configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use listing_scraper::config::HttpConfig;
/// use listing_scraper::crawler::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.timeout_secs.min(10)))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a single page with one GET request
///
/// | Condition | Result |
/// |-----------|--------|
/// | HTTP 200 | `Success` |
/// | Any other status | `HttpError` |
/// | Timeout | `NetworkError` |
/// | Connection refused | `NetworkError` |
/// | Body read failure | `NetworkError` |
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
pub async fn fetch_page(client: &Client, url: &str) -> FetchResult {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => {
            let error = if e.is_timeout() {
                "Request timeout".to_string()
            } else if e.is_connect() {
                format!("Connection failed: {}", e)
            } else {
                e.to_string()
            };
            tracing::warn!("GET {} failed: {}", url, error);
            return FetchResult::NetworkError { error };
        }
    };

    let status = response.status();
    if status != StatusCode::OK {
        tracing::warn!("GET {} returned HTTP {}", url, status.as_u16());
        return FetchResult::HttpError {
            status_code: status.as_u16(),
        };
    }

    let final_url = response.url().to_string();
    match response.text().await {
        Ok(body) => {
            tracing::debug!("GET {} -> {} bytes", url, body.len());
            FetchResult::Success {
                final_url,
                body,
            }
        }
        Err(e) => FetchResult::NetworkError {
            error: e.to_string(),
        },
    }
}
