use crate::crawler::WaitPolicy;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure for Movie-Harvest
///
/// Every section is optional in the TOML file; missing values fall back to
/// the defaults targeting the Rotten Tomatoes "movies at home" listing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub fetcher: FetcherConfig,
    pub browser: BrowserSettings,
    pub selectors: SelectorConfig,
    pub output: OutputConfig,
}

/// Target site configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Root URL that relative tile links are joined onto
    #[serde(rename = "root-url")]
    pub root_url: String,

    /// Listing page to paginate and enumerate
    #[serde(rename = "listing-url")]
    pub listing_url: String,

    /// What to do when a detail page has no title heading
    #[serde(rename = "on-missing-title")]
    pub on_missing_title: MissingTitlePolicy,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            root_url: "https://www.rottentomatoes.com/".to_string(),
            listing_url: "https://www.rottentomatoes.com/browse/movies_at_home/".to_string(),
            on_missing_title: MissingTitlePolicy::Abort,
        }
    }
}

/// Handling of detail pages without a title heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MissingTitlePolicy {
    /// Abort the whole run
    #[default]
    Abort,
    /// Log, count and continue with the next tile
    Skip,
}

/// Page loading behavior
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    /// Number of "load more" clicks on the listing page
    #[serde(rename = "click-count")]
    pub click_count: u32,

    /// Wait before capture and before each pagination click
    pub wait: WaitPolicy,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            click_count: 4,
            wait: WaitPolicy::fixed(Duration::from_secs(5)),
        }
    }
}

/// Browser launch settings, passed into the fetcher at construction
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BrowserSettings {
    /// Run without a visible window
    pub headless: bool,

    /// Chrome/Chromium binary; auto-detected when unset
    #[serde(rename = "chrome-executable")]
    pub chrome_executable: Option<PathBuf>,

    /// Disable the Chrome sandbox (needed in most containers)
    #[serde(rename = "no-sandbox")]
    pub no_sandbox: bool,

    /// Timeout for individual DevTools requests (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,

    /// Additional command line switches
    #[serde(rename = "extra-args")]
    pub extra_args: Vec<String>,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            headless: true,
            chrome_executable: None,
            no_sandbox: false,
            request_timeout_secs: 30,
            extra_args: Vec::new(),
        }
    }
}

/// Structural selectors keyed by purpose
///
/// These are a direct dependency on the target site's markup; a markup
/// change only needs this table updated.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// The "load more" button on the listing page
    #[serde(rename = "pagination-control")]
    pub pagination_control: String,

    /// One movie card on the listing page
    #[serde(rename = "listing-tile")]
    pub listing_tile: String,

    /// Link inside a tile
    #[serde(rename = "tile-link")]
    pub tile_link: String,

    /// Detail page heading
    pub title: String,

    /// Metadata list entry on the detail page
    #[serde(rename = "info-item")]
    pub info_item: String,

    /// Label inside an info item
    #[serde(rename = "info-label")]
    pub info_label: String,

    /// Value inside an info item
    #[serde(rename = "info-value")]
    pub info_value: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            pagination_control:
                "#main-page-content > div.discovery > div.discovery__actions > button".to_string(),
            listing_tile: "tile-dynamic".to_string(),
            tile_link: "a[href]".to_string(),
            title: r#"h1[slot="title"]"#.to_string(),
            info_item: "li.info-item".to_string(),
            info_label: r#"b[data-qa="movie-info-item-label"]"#.to_string(),
            info_value: r#"span[data-qa="movie-info-item-value"]"#.to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path to the CSV file, overwritten on every run
    #[serde(rename = "csv-path")]
    pub csv_path: String,

    /// How the Genre list is written into its cell
    #[serde(rename = "genre-format")]
    pub genre_format: GenreFormatKind,

    /// Separator used by the `joined` genre format
    #[serde(rename = "genre-delimiter")]
    pub genre_delimiter: String,

    /// Print the tile count and the final statistics to stdout
    pub progress: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_path: "rottentomatoes_movies.csv".to_string(),
            genre_format: GenreFormatKind::ListLiteral,
            genre_delimiter: ";".to_string(),
            progress: true,
        }
    }
}

/// Genre cell rendering as named in the config file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GenreFormatKind {
    /// `['Action', 'Comedy']`
    #[default]
    ListLiteral,
    /// Items joined with `genre-delimiter`
    Joined,
}
