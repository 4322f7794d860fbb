//! End-to-end pipeline tests
//!
//! A fake fetcher serves canned rendered pages so the walk, extraction and
//! export run exactly as they would against a real browser.

use async_trait::async_trait;
use movie_harvest::config::{Config, MissingTitlePolicy};
use movie_harvest::crawler::FetchOptions;
use movie_harvest::{harvest_with, HarvestError, MovieField, PageFetcher, RenderedDocument};
use std::collections::HashMap;
use std::sync::Mutex;
use tempfile::TempDir;

const ROOT_URL: &str = "https://movies.test/";
const LISTING_URL: &str = "https://movies.test/browse/movies_at_home/";

/// Serves pages from memory and records every request
struct FakeFetcher {
    pages: HashMap<String, String>,
    requests: Mutex<Vec<(String, FetchOptions)>>,
}

impl FakeFetcher {
    fn new() -> Self {
        Self {
            pages: HashMap::new(),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn with_page(mut self, url: &str, html: String) -> Self {
        self.pages.insert(url.to_string(), html);
        self
    }

    fn requests(&self) -> Vec<(String, FetchOptions)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageFetcher for FakeFetcher {
    async fn fetch(
        &self,
        url: &str,
        options: &FetchOptions,
    ) -> Result<RenderedDocument, HarvestError> {
        self.requests
            .lock()
            .unwrap()
            .push((url.to_string(), *options));

        match self.pages.get(url) {
            Some(html) => Ok(RenderedDocument::new(url, html.clone())),
            None => Err(HarvestError::Browser {
                url: url.to_string(),
                message: "navigation failed".to_string(),
            }),
        }
    }
}

fn listing_page(tiles: &[Option<&str>]) -> String {
    let tiles: String = tiles
        .iter()
        .map(|href| match href {
            Some(href) => format!(
                "<tile-dynamic><a href=\"{}\"><span>Poster</span></a></tile-dynamic>",
                href
            ),
            None => "<tile-dynamic><span>Coming soon</span></tile-dynamic>".to_string(),
        })
        .collect();

    format!(
        "<html><body><div id=\"main-page-content\"><div class=\"discovery\">\
         <div class=\"discovery-tiles\">{}</div>\
         <div class=\"discovery__actions\"><button>Load more</button></div>\
         </div></div></body></html>",
        tiles
    )
}

fn detail_page(title: Option<&str>, items: &[(&str, &str)]) -> String {
    let heading = title
        .map(|t| format!("<h1 slot=\"title\">{}</h1>", t))
        .unwrap_or_default();
    let items: String = items
        .iter()
        .map(|(label, value)| {
            format!(
                "<li class=\"info-item\"><b data-qa=\"movie-info-item-label\">{}</b>\
                 <span data-qa=\"movie-info-item-value\">{}</span></li>",
                label, value
            )
        })
        .collect();

    format!(
        "<html><body>{}<ul id=\"info\">{}</ul></body></html>",
        heading, items
    )
}

fn test_config(dir: &TempDir) -> Config {
    let mut config = Config::default();
    config.site.root_url = ROOT_URL.to_string();
    config.site.listing_url = LISTING_URL.to_string();
    config.fetcher.click_count = 2;
    config.output.csv_path = dir
        .path()
        .join("movies.csv")
        .to_string_lossy()
        .into_owned();
    config
}

fn heat_page() -> String {
    detail_page(
        Some("Heat"),
        &[
            ("Genre:", "Crime,\n  Drama"),
            ("Director:", "Michael Mann"),
            ("Runtime:", "2h 50m"),
        ],
    )
}

#[tokio::test]
async fn test_full_harvest_writes_table() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);

    let fetcher = FakeFetcher::new()
        .with_page(LISTING_URL, listing_page(&[Some("/m/heat"), None]))
        .with_page("https://movies.test/m/heat", heat_page());

    let report = harvest_with(&fetcher, &config).await.unwrap();

    assert_eq!(report.statistics.tiles_found, 2);
    assert_eq!(report.statistics.tiles_without_link, 1);
    assert_eq!(report.statistics.records, 1);
    assert_eq!(report.statistics.filled(MovieField::Director), 1);
    assert_eq!(report.statistics.filled(MovieField::Producer), 0);

    let table = std::fs::read_to_string(&report.output_path).unwrap();
    let lines: Vec<&str> = table.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(
        lines[0],
        ",Title,Genre,Original Language,Director,Producer,Writer,\
         Release Date (Theaters),Release Date (Streaming),Runtime,Distributor"
    );
    assert_eq!(lines[1], "0,Heat,\"['Crime', 'Drama']\",,Michael Mann,,,,,2h 50m,");
}

#[tokio::test]
async fn test_only_listing_is_paginated() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);

    let fetcher = FakeFetcher::new()
        .with_page(LISTING_URL, listing_page(&[Some("/m/heat")]))
        .with_page("https://movies.test/m/heat", heat_page());

    harvest_with(&fetcher, &config).await.unwrap();

    let requests = fetcher.requests();
    assert_eq!(requests.len(), 2);

    let (listing_url, listing_options) = &requests[0];
    assert_eq!(listing_url, LISTING_URL);
    assert!(listing_options.simulate_pagination);
    assert_eq!(listing_options.click_count, 2);

    let (detail_url, detail_options) = &requests[1];
    assert_eq!(detail_url, "https://movies.test/m/heat");
    assert!(!detail_options.simulate_pagination);
}

#[tokio::test]
async fn test_records_follow_tile_order_with_duplicates() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);

    let fetcher = FakeFetcher::new()
        .with_page(
            LISTING_URL,
            listing_page(&[Some("/m/heat"), Some("m/alien"), Some("/m/heat")]),
        )
        .with_page("https://movies.test/m/heat", heat_page())
        .with_page(
            "https://movies.test/m/alien",
            detail_page(Some("Alien"), &[("Original Language:", "English")]),
        );

    let report = harvest_with(&fetcher, &config).await.unwrap();
    assert_eq!(report.statistics.records, 3);

    let table = std::fs::read_to_string(&report.output_path).unwrap();
    let titles: Vec<String> = table
        .lines()
        .skip(1)
        .map(|line| line.split(',').nth(1).unwrap_or_default().to_string())
        .collect();
    assert_eq!(titles, vec!["Heat", "Alien", "Heat"]);
}

#[tokio::test]
async fn test_missing_title_aborts_without_output() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);

    let fetcher = FakeFetcher::new()
        .with_page(LISTING_URL, listing_page(&[Some("/m/heat"), Some("/m/blank")]))
        .with_page("https://movies.test/m/heat", heat_page())
        .with_page(
            "https://movies.test/m/blank",
            detail_page(None, &[("Director:", "Nobody")]),
        );

    let result = harvest_with(&fetcher, &config).await;

    assert!(matches!(result, Err(HarvestError::MissingTitle { .. })));
    assert!(!dir.path().join("movies.csv").exists());
}

#[tokio::test]
async fn test_skip_policy_keeps_remaining_movies() {
    let dir = TempDir::new().unwrap();
    let mut config = test_config(&dir);
    config.site.on_missing_title = MissingTitlePolicy::Skip;

    let fetcher = FakeFetcher::new()
        .with_page(LISTING_URL, listing_page(&[Some("/m/blank"), Some("/m/heat")]))
        .with_page("https://movies.test/m/heat", heat_page())
        .with_page("https://movies.test/m/blank", detail_page(None, &[]));

    let report = harvest_with(&fetcher, &config).await.unwrap();

    assert_eq!(report.statistics.records, 1);
    assert_eq!(report.statistics.movies_skipped, 1);

    let table = std::fs::read_to_string(&report.output_path).unwrap();
    assert_eq!(table.lines().count(), 2);
    assert!(table.lines().nth(1).unwrap().starts_with("0,Heat,"));
}

#[tokio::test]
async fn test_fetch_failure_aborts_without_output() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);

    let fetcher = FakeFetcher::new()
        .with_page(LISTING_URL, listing_page(&[Some("/m/heat"), Some("/m/gone")]))
        .with_page("https://movies.test/m/heat", heat_page());

    let result = harvest_with(&fetcher, &config).await;

    assert!(matches!(result, Err(HarvestError::Browser { .. })));
    assert!(!dir.path().join("movies.csv").exists());
}

#[tokio::test]
async fn test_empty_listing_writes_header_only() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);

    let fetcher = FakeFetcher::new().with_page(LISTING_URL, listing_page(&[]));

    let report = harvest_with(&fetcher, &config).await.unwrap();

    assert_eq!(report.statistics.tiles_found, 0);
    let table = std::fs::read_to_string(&report.output_path).unwrap();
    assert_eq!(table.lines().count(), 1);
    assert!(table.starts_with(",Title,Genre,"));
}
