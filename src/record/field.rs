//! Movie field definitions
//!
//! This module defines the fixed set of columns every movie record carries.

use std::fmt;

/// One of the ten fixed keys of a movie record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MovieField {
    /// Taken from the detail page heading, never from an info item
    Title,
    /// The only multi-valued field
    Genre,
    OriginalLanguage,
    Director,
    Producer,
    Writer,
    ReleaseDateTheaters,
    ReleaseDateStreaming,
    Runtime,
    Distributor,
}

impl MovieField {
    /// All fields in output column order
    pub const ALL: [MovieField; 10] = [
        Self::Title,
        Self::Genre,
        Self::OriginalLanguage,
        Self::Director,
        Self::Producer,
        Self::Writer,
        Self::ReleaseDateTheaters,
        Self::ReleaseDateStreaming,
        Self::Runtime,
        Self::Distributor,
    ];

    /// Returns the label as it appears on the detail page and in the CSV header
    pub fn label(&self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Genre => "Genre",
            Self::OriginalLanguage => "Original Language",
            Self::Director => "Director",
            Self::Producer => "Producer",
            Self::Writer => "Writer",
            Self::ReleaseDateTheaters => "Release Date (Theaters)",
            Self::ReleaseDateStreaming => "Release Date (Streaming)",
            Self::Runtime => "Runtime",
            Self::Distributor => "Distributor",
        }
    }

    /// Maps an info-item label to a field
    ///
    /// Surrounding whitespace and a single trailing colon are ignored, so
    /// `"Director:"` and `"Director"` resolve identically. Returns `None`
    /// for unrecognized labels and for `"Title"`, which only the heading
    /// may populate.
    ///
    /// # Example
    ///
    /// ```
    /// use movie_harvest::MovieField;
    ///
    /// assert_eq!(MovieField::from_label("Runtime:"), Some(MovieField::Runtime));
    /// assert_eq!(MovieField::from_label("Box Office (Gross USA):"), None);
    /// ```
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        let label = label.strip_suffix(':').unwrap_or(label).trim();

        Self::ALL
            .into_iter()
            .filter(|field| !matches!(field, Self::Title))
            .find(|field| field.label() == label)
    }
}

impl fmt::Display for MovieField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
