use crate::config::types::{Config, HttpConfig, OutputConfig, TargetConfig};
use crate::crawler::origin_of;
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_target_config(&config.target)?;
    validate_http_config(&config.http)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates the target listing URL
fn validate_target_config(config: &TargetConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base_url: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base_url must use http or https, got '{}'",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "base_url has no host: {}",
            config.base_url
        )));
    }

    // Page links are resolved against this origin
    origin_of(&config.base_url).map_err(|_| {
        ConfigError::InvalidUrl(format!(
            "base_url must be lowercase scheme://host[:port]/path, got '{}'",
            config.base_url
        ))
    })?;

    Ok(())
}

/// Validates HTTP client configuration
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout_secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.csv_path.is_empty() {
        return Err(ConfigError::Validation(
            "csv_path cannot be empty".to_string(),
        ));
    }

    if config.json_path.is_empty() {
        return Err(ConfigError::Validation(
            "json_path cannot be empty".to_string(),
        ));
    }

    if config.csv_path == config.json_path {
        return Err(ConfigError::Validation(format!(
            "csv_path and json_path must differ, both are '{}'",
            config.csv_path
        )));
    }

    Ok(())
}
