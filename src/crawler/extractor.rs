//! Field extractor for movie detail pages
//!
//! This module turns a rendered detail page into a [`MovieRecord`]:
//! - The title comes from the heading and is mandatory
//! - Optional fields come from the labeled info-item list
//! - Unknown labels are ignored, so new fields on the page never fail

use crate::crawler::fetcher::RenderedDocument;
use crate::crawler::selectors::Selectors;
use crate::record::{MovieField, MovieRecord};
use crate::HarvestError;
use scraper::{ElementRef, Html};

/// Extracts a movie record from a rendered detail page
///
/// # Arguments
///
/// * `document` - The rendered detail page
/// * `selectors` - Compiled selector table
///
/// # Returns
///
/// * `Ok(MovieRecord)` - All ten fields, absent ones as `None`
/// * `Err(HarvestError::MissingTitle)` - No heading, or an empty one
///
/// # Example
///
/// ```
/// use movie_harvest::config::SelectorConfig;
/// use movie_harvest::crawler::{extract_movie, Selectors};
/// use movie_harvest::RenderedDocument;
///
/// let html = r#"<h1 slot="title">Heat</h1>
///     <ul><li class="info-item">
///         <b data-qa="movie-info-item-label">Director:</b>
///         <span data-qa="movie-info-item-value">Michael Mann</span>
///     </li></ul>"#;
/// let selectors = Selectors::compile(&SelectorConfig::default()).unwrap();
/// let record = extract_movie(&RenderedDocument::new("https://example.com/m/heat", html), &selectors).unwrap();
///
/// assert_eq!(record.title, "Heat");
/// assert_eq!(record.director.as_deref(), Some("Michael Mann"));
/// assert_eq!(record.runtime, None);
/// ```
pub fn extract_movie(
    document: &RenderedDocument,
    selectors: &Selectors,
) -> Result<MovieRecord, HarvestError> {
    let html = document.parse();
    extract_from_html(&html, &document.url, selectors)
}

fn extract_from_html(
    html: &Html,
    url: &str,
    selectors: &Selectors,
) -> Result<MovieRecord, HarvestError> {
    let title = html
        .select(&selectors.title)
        .next()
        .map(normalized_text)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| HarvestError::MissingTitle {
            url: url.to_string(),
        })?;

    let mut record = MovieRecord::new(title);

    for item in html.select(&selectors.info_item) {
        let Some(label) = item.select(&selectors.info_label).next() else {
            tracing::trace!("Info item without label on {}", url);
            continue;
        };

        let label = normalized_text(label);
        let Some(field) = MovieField::from_label(&label) else {
            tracing::trace!("Ignoring unrecognized label '{}' on {}", label, url);
            continue;
        };

        let value = item
            .select(&selectors.info_value)
            .next()
            .map(normalized_text)
            .filter(|v| !v.is_empty());

        match value {
            Some(value) => record.set_text(field, value),
            None => tracing::debug!("Empty value for '{}' on {}", field, url),
        }
    }

    Ok(record)
}

/// Collects an element's text with whitespace normalized
///
/// Non-breaking spaces are treated as spaces, runs of whitespace collapse to
/// a single space and the ends are trimmed.
fn normalized_text(element: ElementRef<'_>) -> String {
    let raw: String = element.text().collect();
    normalize_whitespace(&raw)
}

/// Collapses whitespace, including U+00A0, to single spaces
pub fn normalize_whitespace(text: &str) -> String {
    text.split(|c: char| c.is_whitespace() || c == '\u{a0}')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
