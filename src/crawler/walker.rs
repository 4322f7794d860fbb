//! Catalog walker
//!
//! Enumerates the tiles of a rendered listing page, resolves each to a
//! detail page and extracts one record per movie, strictly in tile order
//! and one movie at a time.

use crate::config::{FetcherConfig, MissingTitlePolicy};
use crate::crawler::extractor::extract_movie;
use crate::crawler::fetcher::{FetchOptions, PageFetcher, RenderedDocument};
use crate::crawler::selectors::Selectors;
use crate::record::{CatalogEntry, MovieRecord};
use crate::HarvestError;
use url::Url;

/// Outcome of walking one listing
#[derive(Debug, Clone, Default)]
pub struct WalkReport {
    /// Records in listing order
    pub records: Vec<MovieRecord>,

    /// Tiles found on the rendered listing
    pub tiles_found: usize,

    /// Tiles dropped because they had no usable link
    pub tiles_without_link: usize,

    /// Detail pages skipped under [`MissingTitlePolicy::Skip`]
    pub movies_skipped: usize,
}

/// Walks a listing page and its detail pages
pub struct CatalogWalker<'a> {
    fetcher: &'a dyn PageFetcher,
    selectors: &'a Selectors,
    fetcher_config: FetcherConfig,
    on_missing_title: MissingTitlePolicy,
    progress: bool,
}

impl<'a> CatalogWalker<'a> {
    pub fn new(
        fetcher: &'a dyn PageFetcher,
        selectors: &'a Selectors,
        fetcher_config: FetcherConfig,
    ) -> Self {
        Self {
            fetcher,
            selectors,
            fetcher_config,
            on_missing_title: MissingTitlePolicy::Abort,
            progress: true,
        }
    }

    /// Sets how detail pages without a title are handled
    pub fn with_missing_title_policy(mut self, policy: MissingTitlePolicy) -> Self {
        self.on_missing_title = policy;
        self
    }

    /// Sets whether the tile count is announced on stdout
    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    /// Walks the listing at `listing_url`
    ///
    /// # Arguments
    ///
    /// * `listing_url` - The paginated listing page
    /// * `root_url` - Base that relative tile links are joined onto
    ///
    /// # Errors
    ///
    /// Any fetch error aborts the walk. A missing title aborts it as well
    /// unless the skip policy is set.
    pub async fn walk(&self, listing_url: &str, root_url: &str) -> Result<WalkReport, HarvestError> {
        let root = Url::parse(root_url)?;

        let listing = self
            .fetcher
            .fetch(listing_url, &FetchOptions::listing(&self.fetcher_config))
            .await?;

        let (tiles_found, entries) = listing_entries(&listing, self.selectors, &root);

        tracing::info!("Found {} movies to be scraped", tiles_found);
        if self.progress {
            println!("Found {} movies to be scraped!", tiles_found);
        }

        let mut report = WalkReport {
            records: Vec::with_capacity(entries.len()),
            tiles_found,
            tiles_without_link: tiles_found - entries.len(),
            movies_skipped: 0,
        };

        let detail_options = FetchOptions::detail(&self.fetcher_config);
        let total = entries.len();

        for (index, entry) in entries.iter().enumerate() {
            tracing::debug!("[{}/{}] Fetching {}", index + 1, total, entry.detail_url);

            let detail = self.fetcher.fetch(&entry.detail_url, &detail_options).await?;

            match extract_movie(&detail, self.selectors) {
                Ok(record) => {
                    tracing::info!("[{}/{}] {}", index + 1, total, record.title);
                    report.records.push(record);
                }
                Err(e @ HarvestError::MissingTitle { .. })
                    if self.on_missing_title == MissingTitlePolicy::Skip =>
                {
                    tracing::warn!("Skipping movie: {}", e);
                    report.movies_skipped += 1;
                }
                Err(e) => return Err(e),
            }
        }

        Ok(report)
    }
}

/// Enumerates the tiles of a listing page
///
/// Returns the total number of tiles and the entries of those with a usable
/// link, in document order. Tiles without a link are dropped.
pub fn listing_entries(
    listing: &RenderedDocument,
    selectors: &Selectors,
    root: &Url,
) -> (usize, Vec<CatalogEntry>) {
    let html = listing.parse();
    let mut tiles_found = 0;
    let mut entries = Vec::new();

    for tile in html.select(&selectors.listing_tile) {
        tiles_found += 1;

        let href = tile
            .select(&selectors.tile_link)
            .next()
            .and_then(|a| a.value().attr("href"))
            .map(str::trim)
            .filter(|href| !href.is_empty());

        let Some(href) = href else {
            tracing::debug!("Skipping tile {} without a link", tiles_found);
            continue;
        };

        match resolve_detail_url(href, root) {
            Some(detail_url) => entries.push(CatalogEntry {
                href: href.to_string(),
                detail_url,
            }),
            None => tracing::debug!("Skipping tile {} with unresolvable link {}", tiles_found, href),
        }
    }

    (tiles_found, entries)
}

/// Resolves a tile link to an absolute detail page URL
///
/// Absolute `http(s)` links are kept as they are. Anything else has a single
/// leading `/` stripped and is appended to `root` as text, so the remainder
/// is never read as a scheme or authority of its own.
///
/// # Example
///
/// ```
/// use movie_harvest::crawler::resolve_detail_url;
/// use url::Url;
///
/// let root = Url::parse("https://www.rottentomatoes.com/").unwrap();
/// assert_eq!(
///     resolve_detail_url("/m/example_movie", &root).as_deref(),
///     Some("https://www.rottentomatoes.com/m/example_movie")
/// );
/// ```
pub fn resolve_detail_url(href: &str, root: &Url) -> Option<String> {
    if href.starts_with("http://") || href.starts_with("https://") {
        return Url::parse(href).ok().map(String::from);
    }

    let relative = href.strip_prefix('/').unwrap_or(href);
    let url = Url::parse(&format!("{}{}", root.as_str(), relative)).ok()?;

    // Root paths end with '/', so appending stays on the same site
    if url.scheme() != root.scheme() || url.host_str() != root.host_str() {
        return None;
    }

    Some(url.into())
}
