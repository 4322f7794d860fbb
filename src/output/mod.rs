//! Output module for exporting harvested catalogs
//!
//! This module handles:
//! - Writing the catalog as a CSV table
//! - Summarizing field coverage and walk counters

mod csv_export;
pub mod stats;
mod traits;

pub use csv_export::{CsvExporter, GenreFormat};
pub use stats::{print_statistics, CatalogStatistics};
pub use traits::{CatalogExporter, OutputError, OutputResult};
