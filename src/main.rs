//! Movie-Harvest main entry point
//!
//! This is the command-line interface for the Movie-Harvest catalog scraper.

use anyhow::Context;
use clap::Parser;
use movie_harvest::config::{load_config_with_hash, validate, Config, MissingTitlePolicy};
use movie_harvest::crawler::{Selectors, WaitPolicy};
use movie_harvest::output::print_statistics;
use movie_harvest::run_harvest;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Movie-Harvest: a rendered-page movie catalog scraper
///
/// Movie-Harvest renders the Rotten Tomatoes "movies at home" listing in a
/// headless browser, loads more tiles, visits every movie and writes the
/// extracted metadata to a CSV file.
#[derive(Parser, Debug)]
#[command(name = "movie-harvest")]
#[command(version = "1.0.0")]
#[command(about = "A rendered-page movie catalog scraper", long_about = None)]
struct Cli {
    /// Path to an optional TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Output CSV path (overrides the configuration)
    #[arg(short, long, value_name = "FILE")]
    output: Option<String>,

    /// Number of "load more" clicks on the listing page
    #[arg(long, value_name = "N")]
    clicks: Option<u32>,

    /// Fixed settle delay in seconds before each capture and click
    #[arg(long, value_name = "SECS")]
    delay: Option<u64>,

    /// Show the browser window
    #[arg(long)]
    headed: bool,

    /// Skip movies whose detail page has no title instead of aborting
    #[arg(long)]
    skip_missing_title: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress logs and progress output; only errors are shown
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Show the effective configuration without launching a browser
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::info!("No configuration file given, using defaults");
            Config::default()
        }
    };

    apply_overrides(&mut config, &cli);
    validate(&config).context("Invalid configuration")?;

    if cli.dry_run {
        handle_dry_run(&config)?;
        return Ok(());
    }

    handle_harvest(config).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("movie_harvest=info,warn"),
            1 => EnvFilter::new("movie_harvest=debug,info"),
            2 => EnvFilter::new("movie_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Applies command line overrides on top of the loaded configuration
fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(output) = &cli.output {
        config.output.csv_path = output.clone();
    }

    if let Some(clicks) = cli.clicks {
        config.fetcher.click_count = clicks;
    }

    if let Some(delay) = cli.delay {
        config.fetcher.wait = WaitPolicy::fixed(Duration::from_secs(delay));
    }

    if cli.headed {
        config.browser.headless = false;
    }

    if cli.skip_missing_title {
        config.site.on_missing_title = MissingTitlePolicy::Skip;
    }

    if cli.quiet {
        config.output.progress = false;
    }
}

/// Handles the --dry-run mode: shows what would be harvested
fn handle_dry_run(config: &Config) -> anyhow::Result<()> {
    // Already validated; compiling again proves the table to the user
    Selectors::compile(&config.selectors)?;

    println!("=== Movie-Harvest Dry Run ===\n");

    println!("Site:");
    println!("  Listing URL: {}", config.site.listing_url);
    println!("  Root URL: {}", config.site.root_url);
    println!("  On missing title: {:?}", config.site.on_missing_title);

    println!("\nFetcher:");
    println!("  Load-more clicks: {}", config.fetcher.click_count);
    println!(
        "  Wait policy: {:?} (up to {:?} per wait)",
        config.fetcher.wait,
        config.fetcher.wait.max_duration()
    );

    println!("\nBrowser:");
    println!("  Headless: {}", config.browser.headless);
    if let Some(path) = &config.browser.chrome_executable {
        println!("  Executable: {}", path.display());
    }
    println!("  Request timeout: {}s", config.browser.request_timeout_secs);

    println!("\nSelectors:");
    println!("  Pagination control: {}", config.selectors.pagination_control);
    println!("  Listing tile: {}", config.selectors.listing_tile);
    println!("  Tile link: {}", config.selectors.tile_link);
    println!("  Title: {}", config.selectors.title);
    println!("  Info item: {}", config.selectors.info_item);
    println!("  Info label: {}", config.selectors.info_label);
    println!("  Info value: {}", config.selectors.info_value);

    println!("\nOutput:");
    println!("  CSV: {}", config.output.csv_path);
    println!("  Genre format: {:?}", config.output.genre_format);
    println!("  Progress: {}", config.output.progress);

    println!("\n✓ Configuration is valid");

    Ok(())
}

/// Handles the main harvest operation
async fn handle_harvest(config: Config) -> anyhow::Result<()> {
    tracing::info!(
        "Starting harvest of {} ({} load-more clicks)",
        config.site.listing_url,
        config.fetcher.click_count
    );

    let progress = config.output.progress;
    match run_harvest(config).await {
        Ok(report) => {
            tracing::info!("Harvest completed: {}", report.output_path.display());
            if progress {
                print_statistics(&report.statistics);
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!("Harvest failed: {}", e);
            Err(e.into())
        }
    }
}
