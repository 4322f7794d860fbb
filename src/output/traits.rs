//! Exporter trait and error types
//!
//! This module defines the interface implemented by catalog exporters and
//! the errors they report.

use crate::record::MovieRecord;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write table: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Trait for catalog exporters
///
/// Exporters write a complete catalog in one call and replace any existing
/// file at the destination.
pub trait CatalogExporter {
    /// Writes all records to `path`
    ///
    /// # Arguments
    ///
    /// * `records` - The catalog, in listing order
    /// * `path` - Destination file, overwritten if present
    fn export(&self, records: &[MovieRecord], path: &Path) -> OutputResult<()>;
}
