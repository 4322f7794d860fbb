//! Rendered-page fetcher
//!
//! This module turns a URL into fully rendered markup, including:
//! - Launching an isolated headless browser session per call
//! - Waiting for dynamic content per the configured wait policy
//! - Clicking the pagination control to load more listing tiles
//! - Capturing the final DOM as HTML

use crate::config::{BrowserSettings, FetcherConfig};
use crate::crawler::wait::WaitPolicy;
use crate::HarvestError;
use async_trait::async_trait;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use scraper::Html;
use std::time::Duration;

/// Script used to activate the pagination control
///
/// A script-level click is not intercepted by overlays the way a synthetic
/// mouse event can be.
const CLICK_FUNCTION: &str = "function() { this.click(); }";

/// Fully rendered markup of a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    /// URL the document was fetched from
    pub url: String,

    /// Serialized DOM after rendering
    pub html: String,
}

impl RenderedDocument {
    pub fn new(url: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            html: html.into(),
        }
    }

    /// Parses the markup into a queryable DOM
    pub fn parse(&self) -> Html {
        Html::parse_document(&self.html)
    }
}

/// Per-call fetch options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchOptions {
    /// Click the pagination control before capturing
    pub simulate_pagination: bool,

    /// How many times to click it
    pub click_count: u32,

    /// Wait before capture and before each click
    pub wait: WaitPolicy,
}

impl FetchOptions {
    /// Options for the listing page: paginate `click_count` times
    pub fn listing(config: &FetcherConfig) -> Self {
        Self {
            simulate_pagination: true,
            click_count: config.click_count,
            wait: config.wait,
        }
    }

    /// Options for a detail page: no pagination
    pub fn detail(config: &FetcherConfig) -> Self {
        Self {
            simulate_pagination: false,
            click_count: 0,
            wait: config.wait,
        }
    }
}

/// Source of rendered pages
///
/// The production implementation drives a real browser; tests substitute a
/// fetcher returning canned markup.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches `url` and returns its rendered markup
    ///
    /// # Errors
    ///
    /// - `ElementNotFound` if pagination is requested and the control is
    ///   missing before any click
    /// - `Browser` for launch, navigation or protocol failures
    async fn fetch(&self, url: &str, options: &FetchOptions) -> Result<RenderedDocument, HarvestError>;
}

/// Fetcher backed by a Chrome DevTools Protocol session
pub struct BrowserFetcher {
    settings: BrowserSettings,
    pagination_selector: String,
}

impl BrowserFetcher {
    /// Creates a fetcher
    ///
    /// # Arguments
    ///
    /// * `settings` - Browser launch settings, applied to every session
    /// * `pagination_selector` - CSS selector of the "load more" control
    pub fn new(settings: BrowserSettings, pagination_selector: impl Into<String>) -> Self {
        Self {
            settings,
            pagination_selector: pagination_selector.into(),
        }
    }

    /// Builds the chromiumoxide launch configuration
    fn browser_config(&self) -> Result<BrowserConfig, String> {
        let mut builder = BrowserConfig::builder()
            .request_timeout(Duration::from_secs(self.settings.request_timeout_secs));

        if !self.settings.headless {
            builder = builder.with_head();
        }

        if let Some(path) = &self.settings.chrome_executable {
            builder = builder.chrome_executable(path);
        }

        if self.settings.no_sandbox {
            builder = builder.no_sandbox();
        }

        for arg in &self.settings.extra_args {
            builder = builder.arg(arg.as_str());
        }

        builder.build()
    }
}

/// Page operations the pagination loop relies on
#[async_trait]
pub(crate) trait RenderTarget: Send + Sync {
    /// Returns true if `selector` currently matches an element
    async fn contains(&self, selector: &str) -> bool;

    /// Clicks the first element matching `selector`
    ///
    /// Returns `Ok(false)` if nothing matched.
    async fn find_and_click(&self, selector: &str) -> Result<bool, String>;

    /// Serializes the current DOM
    async fn content(&self) -> Result<String, String>;
}

#[async_trait]
impl RenderTarget for Page {
    async fn contains(&self, selector: &str) -> bool {
        self.find_elements(selector)
            .await
            .map(|elements| !elements.is_empty())
            .unwrap_or(false)
    }

    async fn find_and_click(&self, selector: &str) -> Result<bool, String> {
        // querySelectorAll reports absence as an empty list, not an error
        let elements = self.find_elements(selector).await.map_err(|e| e.to_string())?;
        let Some(element) = elements.into_iter().next() else {
            return Ok(false);
        };

        element
            .call_js_fn(CLICK_FUNCTION, false)
            .await
            .map_err(|e| e.to_string())?;
        Ok(true)
    }

    async fn content(&self) -> Result<String, String> {
        Page::content(self).await.map_err(|e| e.to_string())
    }
}

/// Clicks the pagination control as requested, then captures the page
///
/// Waits per policy before every click. A control that is missing when a
/// click is due fails the fetch with `ElementNotFound`; nothing is captured.
pub(crate) async fn paginate_and_capture(
    page: &dyn RenderTarget,
    pagination_selector: &str,
    url: &str,
    options: &FetchOptions,
) -> Result<String, HarvestError> {
    if options.simulate_pagination {
        tracing::info!("Loading more data ({} clicks)", options.click_count);

        for click in 1..=options.click_count {
            options
                .wait
                .wait_until(move || async move { page.contains(pagination_selector).await })
                .await;

            tracing::debug!("Clicking pagination control ({}/{})", click, options.click_count);
            let clicked = page
                .find_and_click(pagination_selector)
                .await
                .map_err(|message| browser_error(url, message))?;

            if !clicked {
                return Err(HarvestError::ElementNotFound {
                    selector: pagination_selector.to_string(),
                    url: url.to_string(),
                });
            }
        }
    }

    page.content().await.map_err(|message| browser_error(url, message))
}

#[async_trait]
impl PageFetcher for BrowserFetcher {
    async fn fetch(&self, url: &str, options: &FetchOptions) -> Result<RenderedDocument, HarvestError> {
        let config = self.browser_config().map_err(|message| HarvestError::Browser {
            url: url.to_string(),
            message,
        })?;

        tracing::debug!("Launching browser for {}", url);
        let (mut browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| browser_error(url, e))?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::trace!("Browser handler event error: {}", e);
                }
            }
        });

        let result = async {
            let page = browser.new_page(url).await.map_err(|e| browser_error(url, e))?;

            // Settle before capture; also paces successive sessions
            let page_ref = &page;
            let ready = options
                .wait
                .wait_until(move || async move { document_ready(page_ref).await })
                .await;
            if !ready {
                tracing::debug!("Document for {} not ready before capture", url);
            }

            let html =
                paginate_and_capture(&page, &self.pagination_selector, url, options).await?;

            if let Err(e) = page.close().await {
                tracing::warn!("Failed to close page {}: {}", url, e);
            }

            Ok::<_, HarvestError>(html)
        }
        .await;

        // Sessions are never reused
        if let Err(e) = browser.close().await {
            tracing::warn!("Failed to close browser: {}", e);
            if let Some(Err(e)) = browser.kill().await {
                tracing::warn!("Failed to kill browser: {}", e);
            }
        }
        if let Err(e) = browser.wait().await {
            tracing::warn!("Failed to wait for browser exit: {}", e);
        }
        handler_task.abort();

        let html = result?;
        tracing::debug!("Captured {} bytes from {}", html.len(), url);

        Ok(RenderedDocument::new(url, html))
    }
}

/// Returns true once `document.readyState` is `complete`
async fn document_ready(page: &Page) -> bool {
    match page.evaluate("document.readyState").await {
        Ok(result) => result
            .into_value::<String>()
            .map(|state| state == "complete")
            .unwrap_or(false),
        Err(_) => false,
    }
}

fn browser_error(url: &str, error: impl std::fmt::Display) -> HarvestError {
    HarvestError::Browser {
        url: url.to_string(),
        message: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    const CONTROL: &str = "button.load-more";

    /// Page whose control disappears after `clicks_available` clicks
    struct FakePage {
        clicks_available: usize,
        events: Mutex<Vec<&'static str>>,
    }

    impl FakePage {
        fn new(clicks_available: usize) -> Self {
            Self {
                clicks_available,
                events: Mutex::new(Vec::new()),
            }
        }

        fn events(&self) -> Vec<&'static str> {
            self.events.lock().unwrap().clone()
        }

        fn clicks(&self) -> usize {
            self.events().iter().filter(|e| **e == "click").count()
        }
    }

    #[async_trait]
    impl RenderTarget for FakePage {
        async fn contains(&self, _selector: &str) -> bool {
            self.events.lock().unwrap().push("probe");
            self.clicks() < self.clicks_available
        }

        async fn find_and_click(&self, _selector: &str) -> Result<bool, String> {
            if self.clicks() >= self.clicks_available {
                return Ok(false);
            }
            self.events.lock().unwrap().push("click");
            Ok(true)
        }

        async fn content(&self) -> Result<String, String> {
            self.events.lock().unwrap().push("capture");
            Ok("<html></html>".to_string())
        }
    }

    /// Page whose protocol connection is broken
    struct BrokenPage;

    #[async_trait]
    impl RenderTarget for BrokenPage {
        async fn contains(&self, _selector: &str) -> bool {
            false
        }

        async fn find_and_click(&self, _selector: &str) -> Result<bool, String> {
            Err("connection closed".to_string())
        }

        async fn content(&self) -> Result<String, String> {
            Err("connection closed".to_string())
        }
    }

    fn listing_options(click_count: u32) -> FetchOptions {
        FetchOptions {
            simulate_pagination: true,
            click_count,
            wait: WaitPolicy::poll(Duration::from_millis(1), Duration::from_millis(20)),
        }
    }

    #[tokio::test]
    async fn test_waits_before_every_click_then_captures() {
        let page = FakePage::new(10);

        let html = paginate_and_capture(&page, CONTROL, "https://example.com/", &listing_options(3))
            .await
            .unwrap();

        assert_eq!(html, "<html></html>");
        assert_eq!(
            page.events(),
            vec!["probe", "click", "probe", "click", "probe", "click", "capture"]
        );
    }

    #[tokio::test]
    async fn test_missing_control_fails_without_capture() {
        let page = FakePage::new(0);

        let result =
            paginate_and_capture(&page, CONTROL, "https://example.com/", &listing_options(4)).await;

        match result {
            Err(HarvestError::ElementNotFound { selector, url }) => {
                assert_eq!(selector, CONTROL);
                assert_eq!(url, "https://example.com/");
            }
            other => panic!("expected ElementNotFound, got {:?}", other),
        }
        assert_eq!(page.clicks(), 0);
        assert!(!page.events().contains(&"capture"));
    }

    #[tokio::test]
    async fn test_control_vanishing_mid_pagination_is_fatal() {
        let page = FakePage::new(2);

        let result =
            paginate_and_capture(&page, CONTROL, "https://example.com/", &listing_options(4)).await;

        assert!(matches!(result, Err(HarvestError::ElementNotFound { .. })));
        assert_eq!(page.clicks(), 2);
        assert!(!page.events().contains(&"capture"));
    }

    #[tokio::test]
    async fn test_detail_fetch_never_clicks() {
        let page = FakePage::new(10);
        let options = FetchOptions::detail(&FetcherConfig::default());

        paginate_and_capture(&page, CONTROL, "https://example.com/m/x", &options)
            .await
            .unwrap();

        assert_eq!(page.events(), vec!["capture"]);
    }

    #[tokio::test]
    async fn test_protocol_failure_is_browser_error() {
        let result =
            paginate_and_capture(&BrokenPage, CONTROL, "https://example.com/", &listing_options(1))
                .await;

        match result {
            Err(HarvestError::Browser { message, .. }) => {
                assert_eq!(message, "connection closed")
            }
            other => panic!("expected Browser error, got {:?}", other),
        }
    }

    #[test]
    fn test_listing_options_paginate() {
        let config = FetcherConfig::default();
        let options = FetchOptions::listing(&config);

        assert!(options.simulate_pagination);
        assert_eq!(options.click_count, 4);
        assert_eq!(options.wait, WaitPolicy::fixed(Duration::from_secs(5)));
    }

    #[test]
    fn test_detail_options_do_not_paginate() {
        let options = FetchOptions::detail(&FetcherConfig::default());
        assert!(!options.simulate_pagination);
        assert_eq!(options.click_count, 0);
    }

    #[test]
    fn test_rendered_document_parse() {
        let doc = RenderedDocument::new(
            "https://example.com/",
            "<html><body><h1>Hi</h1></body></html>",
        );
        let html = doc.parse();
        let h1 = scraper::Selector::parse("h1").unwrap();
        assert_eq!(html.select(&h1).count(), 1);
    }
}
