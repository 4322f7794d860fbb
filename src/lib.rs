//! Movie-Harvest: a rendered-page movie catalog scraper
//!
//! This crate drives a headless browser through the Rotten Tomatoes
//! "movies at home" listing, follows every movie tile to its detail page,
//! extracts a fixed set of metadata fields and writes them to a CSV table.

pub mod config;
pub mod crawler;
pub mod output;
pub mod record;

use thiserror::Error;

/// Main error type for Movie-Harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Element not found on {url}: {selector}")]
    ElementNotFound { selector: String, url: String },

    #[error("Missing title heading on {url}")]
    MissingTitle { url: String },

    #[error("Browser error for {url}: {message}")]
    Browser { url: String, message: String },

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

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

    #[error("Invalid {purpose} selector '{selector}'")]
    InvalidSelector { purpose: String, selector: String },
}

/// Result type alias for Movie-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{harvest_with, run_harvest, HarvestReport, PageFetcher, RenderedDocument};
pub use record::{FieldValue, MovieField, MovieRecord};
