use serde::Deserialize;

/// Listing scraped when no other target is configured
pub const DEFAULT_BASE_URL: &str =
    "https://webscraper.io/test-sites/e-commerce/static/computers/laptops";

pub const DEFAULT_CSV_PATH: &str = "computers_data.csv";
pub const DEFAULT_JSON_PATH: &str = "computers_data.json";

/// Main configuration structure for Listing-Scraper
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub target: TargetConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// What to scrape
#[derive(Debug, Clone, Deserialize)]
pub struct TargetConfig {
    /// First listing page; pagination links are discovered from it
    #[serde(rename = "base-url", default = "default_base_url")]
    pub base_url: String,
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Whole-request timeout in seconds
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the CSV export
    #[serde(rename = "csv-path", default = "default_csv_path")]
    pub csv_path: String,

    /// Path to the JSON export
    #[serde(rename = "json-path", default = "default_json_path")]
    pub json_path: String,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_path: default_csv_path(),
            json_path: default_json_path(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_user_agent() -> String {
    format!("listing-scraper/{}", env!("CARGO_PKG_VERSION"))
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_csv_path() -> String {
    DEFAULT_CSV_PATH.to_string()
}

fn default_json_path() -> String {
    DEFAULT_JSON_PATH.to_string()
}
