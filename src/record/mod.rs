//! Movie record model
//!
//! This module defines the record produced for every movie and the
//! transient catalog entry that links a listing tile to its detail page.

mod field;

pub use field::MovieField;

/// Metadata extracted from one movie detail page
///
/// Every field is always present in the structure; optional ones hold
/// `None` until a matching info item populates them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieRecord {
    pub title: String,
    pub genre: Option<Vec<String>>,
    pub original_language: Option<String>,
    pub director: Option<String>,
    pub producer: Option<String>,
    pub writer: Option<String>,
    pub release_date_theaters: Option<String>,
    pub release_date_streaming: Option<String>,
    pub runtime: Option<String>,
    pub distributor: Option<String>,
}

/// Borrowed view of a single record value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Absent,
    Text(&'a str),
    List(&'a [String]),
}

impl FieldValue<'_> {
    /// Returns true if the field holds no value
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

impl MovieRecord {
    /// Creates a record with the given title and every other field absent
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            genre: None,
            original_language: None,
            director: None,
            producer: None,
            writer: None,
            release_date_theaters: None,
            release_date_streaming: None,
            runtime: None,
            distributor: None,
        }
    }

    /// Returns the value stored under `field`
    pub fn get(&self, field: MovieField) -> FieldValue<'_> {
        match field {
            MovieField::Title => FieldValue::Text(&self.title),
            MovieField::Genre => match &self.genre {
                Some(genres) => FieldValue::List(genres),
                None => FieldValue::Absent,
            },
            MovieField::OriginalLanguage => text_value(self.original_language.as_deref()),
            MovieField::Director => text_value(self.director.as_deref()),
            MovieField::Producer => text_value(self.producer.as_deref()),
            MovieField::Writer => text_value(self.writer.as_deref()),
            MovieField::ReleaseDateTheaters => text_value(self.release_date_theaters.as_deref()),
            MovieField::ReleaseDateStreaming => text_value(self.release_date_streaming.as_deref()),
            MovieField::Runtime => text_value(self.runtime.as_deref()),
            MovieField::Distributor => text_value(self.distributor.as_deref()),
        }
    }

    /// Stores a single-valued field, overwriting any previous value
    ///
    /// Setting `Genre` through this method splits the text on commas.
    pub fn set_text(&mut self, field: MovieField, value: String) {
        let slot = match field {
            MovieField::Title => {
                self.title = value;
                return;
            }
            MovieField::Genre => {
                self.genre = Some(split_genres(&value)).filter(|g| !g.is_empty());
                return;
            }
            MovieField::OriginalLanguage => &mut self.original_language,
            MovieField::Director => &mut self.director,
            MovieField::Producer => &mut self.producer,
            MovieField::Writer => &mut self.writer,
            MovieField::ReleaseDateTheaters => &mut self.release_date_theaters,
            MovieField::ReleaseDateStreaming => &mut self.release_date_streaming,
            MovieField::Runtime => &mut self.runtime,
            MovieField::Distributor => &mut self.distributor,
        };
        *slot = Some(value);
    }

    /// Iterates over all ten fields in column order
    pub fn fields(&self) -> impl Iterator<Item = (MovieField, FieldValue<'_>)> + '_ {
        MovieField::ALL.into_iter().map(move |f| (f, self.get(f)))
    }
}

fn text_value(value: Option<&str>) -> FieldValue<'_> {
    match value {
        Some(s) => FieldValue::Text(s),
        None => FieldValue::Absent,
    }
}

/// Splits a genre value into its trimmed, non-empty parts
///
/// # Example
///
/// ```
/// use movie_harvest::record::split_genres;
///
/// assert_eq!(
///     split_genres("Action, Comedy ,Drama"),
///     vec!["Action", "Comedy", "Drama"]
/// );
/// ```
pub fn split_genres(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|part| part.replace(['\n', '\r'], ""))
        .map(|part| part.trim().to_string())
        .filter(|part| !part.is_empty())
        .collect()
}

/// A listing tile resolved to its detail page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    /// The href as found on the tile
    pub href: String,

    /// Absolute detail page URL
    pub detail_url: String,
}
