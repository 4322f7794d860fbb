//! Compiled selector table
//!
//! All structural knowledge about the target site's markup lives in
//! [`SelectorConfig`]; this module compiles it once so that a bad selector
//! fails at startup instead of mid-run.

use crate::config::SelectorConfig;
use crate::ConfigError;
use scraper::Selector;

/// Selectors compiled from a [`SelectorConfig`]
#[derive(Debug, Clone)]
pub struct Selectors {
    /// Kept as text; it is queried inside the browser, not in scraper
    pub pagination_control: String,
    pub listing_tile: Selector,
    pub tile_link: Selector,
    pub title: Selector,
    pub info_item: Selector,
    pub info_label: Selector,
    pub info_value: Selector,
}

impl Selectors {
    /// Compiles every selector in the table
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidSelector` naming the first selector that
    /// does not parse.
    pub fn compile(config: &SelectorConfig) -> Result<Self, ConfigError> {
        // Validate the browser-side selector with the same grammar
        compile_one("pagination-control", &config.pagination_control)?;

        Ok(Self {
            pagination_control: config.pagination_control.clone(),
            listing_tile: compile_one("listing-tile", &config.listing_tile)?,
            tile_link: compile_one("tile-link", &config.tile_link)?,
            title: compile_one("title", &config.title)?,
            info_item: compile_one("info-item", &config.info_item)?,
            info_label: compile_one("info-label", &config.info_label)?,
            info_value: compile_one("info-value", &config.info_value)?,
        })
    }
}

fn compile_one(purpose: &str, selector: &str) -> Result<Selector, ConfigError> {
    if selector.trim().is_empty() {
        return Err(ConfigError::InvalidSelector {
            purpose: purpose.to_string(),
            selector: selector.to_string(),
        });
    }

    Selector::parse(selector).map_err(|_| ConfigError::InvalidSelector {
        purpose: purpose.to_string(),
        selector: selector.to_string(),
    })
}
