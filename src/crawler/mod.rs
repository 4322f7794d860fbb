//! Crawler module for rendering pages and extracting movies
//!
//! This module contains the scraping pipeline, including:
//! - Rendered page fetching through a headless browser
//! - Wait policies for dynamic content
//! - Field extraction from detail pages
//! - Listing traversal and overall coordination

mod coordinator;
mod extractor;
mod fetcher;
mod selectors;
mod wait;
mod walker;

pub use coordinator::{harvest_with, run_harvest, HarvestReport};
pub use extractor::{extract_movie, normalize_whitespace};
pub use fetcher::{BrowserFetcher, FetchOptions, PageFetcher, RenderedDocument};
pub use selectors::Selectors;
pub use wait::WaitPolicy;
pub use walker::{listing_entries, resolve_detail_url, CatalogWalker, WalkReport};
