//! Harvest coordinator - the end-to-end pipeline
//!
//! Walks the catalog, then exports it. The export only starts after the
//! whole walk succeeded, so a failed run never leaves a partial table.

use crate::config::Config;
use crate::crawler::fetcher::{BrowserFetcher, PageFetcher};
use crate::crawler::selectors::Selectors;
use crate::crawler::walker::CatalogWalker;
use crate::output::{CatalogExporter, CatalogStatistics, CsvExporter};
use crate::HarvestError;
use std::path::PathBuf;
use std::time::Instant;

/// Summary of a completed harvest
#[derive(Debug, Clone)]
pub struct HarvestReport {
    /// Where the table was written
    pub output_path: PathBuf,

    /// Counters and per-field fill rates
    pub statistics: CatalogStatistics,
}

/// Runs the pipeline with the given fetcher
///
/// # Arguments
///
/// * `fetcher` - Source of rendered pages
/// * `config` - Harvest configuration
///
/// # Returns
///
/// * `Ok(HarvestReport)` - The table was written
/// * `Err(HarvestError)` - The run aborted; no file was written
pub async fn harvest_with(
    fetcher: &dyn PageFetcher,
    config: &Config,
) -> Result<HarvestReport, HarvestError> {
    let selectors = Selectors::compile(&config.selectors)?;
    harvest_with_selectors(fetcher, config, &selectors).await
}

async fn harvest_with_selectors(
    fetcher: &dyn PageFetcher,
    config: &Config,
    selectors: &Selectors,
) -> Result<HarvestReport, HarvestError> {
    let start_time = Instant::now();

    tracing::info!("Walking listing {}", config.site.listing_url);
    let walker = CatalogWalker::new(fetcher, selectors, config.fetcher.clone())
        .with_missing_title_policy(config.site.on_missing_title)
        .with_progress(config.output.progress);
    let report = walker
        .walk(&config.site.listing_url, &config.site.root_url)
        .await?;

    let output_path = PathBuf::from(&config.output.csv_path);
    let exporter = CsvExporter::from_config(&config.output);
    exporter.export(&report.records, &output_path)?;

    tracing::info!(
        "Wrote {} records to {} in {:.1}s",
        report.records.len(),
        output_path.display(),
        start_time.elapsed().as_secs_f64()
    );

    Ok(HarvestReport {
        output_path,
        statistics: CatalogStatistics::from_report(&report),
    })
}

/// Runs the pipeline against a real browser
///
/// # Example
///
/// ```no_run
/// use movie_harvest::config::Config;
/// use movie_harvest::run_harvest;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let report = run_harvest(Config::default()).await?;
/// println!("{} movies", report.statistics.records);
/// # Ok(())
/// # }
/// ```
pub async fn run_harvest(config: Config) -> Result<HarvestReport, HarvestError> {
    let selectors = Selectors::compile(&config.selectors)?;
    let fetcher = BrowserFetcher::new(
        config.browser.clone(),
        selectors.pagination_control.clone(),
    );
    harvest_with_selectors(&fetcher, &config, &selectors).await
}
