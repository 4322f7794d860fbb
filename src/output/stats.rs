//! Statistics for a harvested catalog
//!
//! This module summarizes a walk: how many tiles were seen, how many became
//! records and how often each field was filled.

use crate::crawler::WalkReport;
use crate::record::MovieField;

/// Catalog statistics summary
#[derive(Debug, Clone, Default)]
pub struct CatalogStatistics {
    /// Tiles found on the rendered listing
    pub tiles_found: usize,

    /// Tiles without a usable link
    pub tiles_without_link: usize,

    /// Records written
    pub records: usize,

    /// Detail pages skipped for lacking a title
    pub movies_skipped: usize,

    /// Number of records with a value, per field in column order
    pub field_counts: Vec<(MovieField, usize)>,
}

impl CatalogStatistics {
    /// Computes statistics from a walk report
    pub fn from_report(report: &WalkReport) -> Self {
        let field_counts = MovieField::ALL
            .iter()
            .map(|&field| {
                let filled = report
                    .records
                    .iter()
                    .filter(|r| !r.get(field).is_absent())
                    .count();
                (field, filled)
            })
            .collect();

        Self {
            tiles_found: report.tiles_found,
            tiles_without_link: report.tiles_without_link,
            records: report.records.len(),
            movies_skipped: report.movies_skipped,
            field_counts,
        }
    }

    /// Returns how many records have `field` set
    pub fn filled(&self, field: MovieField) -> usize {
        self.field_counts
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &CatalogStatistics) {
    println!("=== Harvest Statistics ===\n");

    println!("Overview:");
    println!("  Tiles found: {}", stats.tiles_found);
    println!("  Tiles without link: {}", stats.tiles_without_link);
    println!("  Records written: {}", stats.records);
    if stats.movies_skipped > 0 {
        println!("  Movies skipped (no title): {}", stats.movies_skipped);
    }
    println!();

    println!("Field Coverage:");
    for (field, count) in &stats.field_counts {
        let percentage = if stats.records > 0 {
            (*count as f64 / stats.records as f64) * 100.0
        } else {
            0.0
        };
        println!("  {:<26} {:>5} ({:.1}%)", field.label(), count, percentage);
    }
}
