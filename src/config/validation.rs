use crate::config::types::{BrowserSettings, Config, FetcherConfig, OutputConfig, SiteConfig};
use crate::config::GenreFormatKind;
use crate::crawler::{Selectors, WaitPolicy};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_fetcher_config(&config.fetcher)?;
    validate_browser_settings(&config.browser)?;
    Selectors::compile(&config.selectors)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates target site configuration
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    let root = parse_http_url("root_url", &config.root_url)?;

    // Url::join would drop the last path segment otherwise
    if !root.path().ends_with('/') {
        return Err(ConfigError::Validation(format!(
            "root_url must end with '/', got '{}'",
            config.root_url
        )));
    }

    parse_http_url("listing_url", &config.listing_url)?;

    Ok(())
}

/// Validates fetcher configuration
fn validate_fetcher_config(config: &FetcherConfig) -> Result<(), ConfigError> {
    if config.click_count > 100 {
        return Err(ConfigError::Validation(format!(
            "click_count must be <= 100, got {}",
            config.click_count
        )));
    }

    match config.wait {
        WaitPolicy::Fixed { .. } => {}
        WaitPolicy::Poll {
            interval_ms,
            timeout_ms,
        } => {
            if interval_ms == 0 {
                return Err(ConfigError::Validation(
                    "wait interval_ms must be >= 1".to_string(),
                ));
            }

            if timeout_ms < interval_ms {
                return Err(ConfigError::Validation(format!(
                    "wait timeout_ms ({}) must be >= interval_ms ({})",
                    timeout_ms, interval_ms
                )));
            }
        }
    }

    Ok(())
}

/// Validates browser launch settings
fn validate_browser_settings(config: &BrowserSettings) -> Result<(), ConfigError> {
    if config.request_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "request_timeout_secs must be >= 1".to_string(),
        ));
    }

    if let Some(arg) = config.extra_args.iter().find(|a| !a.starts_with("--")) {
        return Err(ConfigError::Validation(format!(
            "extra_args entries must start with '--', got '{}'",
            arg
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.csv_path.trim().is_empty() {
        return Err(ConfigError::Validation(
            "csv_path cannot be empty".to_string(),
        ));
    }

    if config.genre_format == GenreFormatKind::Joined && config.genre_delimiter.is_empty() {
        return Err(ConfigError::Validation(
            "genre_delimiter cannot be empty with the joined genre format".to_string(),
        ));
    }

    Ok(())
}

/// Parses a URL and requires an HTTP(S) scheme
fn parse_http_url(name: &str, value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", name, value, e)))?;

    if url.scheme() != "https" && url.scheme() != "http" {
        return Err(ConfigError::Validation(format!(
            "{} '{}' must use an HTTP(S) scheme",
            name, value
        )));
    }

    Ok(url)
}
