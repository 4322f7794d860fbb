//! CSV export
//!
//! Writes the catalog as a comma-separated table: an unnamed row-index
//! column followed by the ten movie fields, quoting only where needed.

use crate::config::{GenreFormatKind, OutputConfig};
use crate::output::traits::{CatalogExporter, OutputResult};
use crate::record::{FieldValue, MovieField, MovieRecord};
use std::io::Write;
use std::path::Path;

/// How the Genre list is rendered into a single cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenreFormat {
    /// Bracketed list literal, e.g. `['Action', 'Comedy']`
    ListLiteral,

    /// Items joined by a delimiter, e.g. `Action;Comedy`
    Joined(String),
}

impl GenreFormat {
    /// Renders a genre list into cell text
    pub fn render(&self, genres: &[String]) -> String {
        match self {
            Self::ListLiteral => {
                let items: Vec<String> = genres.iter().map(|g| quote_literal(g)).collect();
                format!("[{}]", items.join(", "))
            }
            Self::Joined(delimiter) => genres.join(delimiter),
        }
    }
}

/// Quotes a string the way a list literal prints its items
///
/// Single quotes are preferred; double quotes are used when the text holds a
/// single quote but no double quote.
fn quote_literal(text: &str) -> String {
    let quote = if text.contains('\'') && !text.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(text.len() + 2);
    out.push(quote);
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

/// Exporter writing RFC 4180 style CSV
#[derive(Debug, Clone)]
pub struct CsvExporter {
    genre_format: GenreFormat,
}

impl Default for CsvExporter {
    fn default() -> Self {
        Self::new(GenreFormat::ListLiteral)
    }
}

impl CsvExporter {
    pub fn new(genre_format: GenreFormat) -> Self {
        Self { genre_format }
    }

    /// Builds an exporter from the output section of the configuration
    pub fn from_config(config: &OutputConfig) -> Self {
        let genre_format = match config.genre_format {
            GenreFormatKind::ListLiteral => GenreFormat::ListLiteral,
            GenreFormatKind::Joined => GenreFormat::Joined(config.genre_delimiter.clone()),
        };
        Self::new(genre_format)
    }

    /// Writes the table to any writer
    pub fn write_to<W: Write>(&self, records: &[MovieRecord], writer: W) -> OutputResult<()> {
        let mut csv = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(writer);

        let header = std::iter::once("").chain(MovieField::ALL.iter().map(|f| f.label()));
        csv.write_record(header)?;

        for (index, record) in records.iter().enumerate() {
            let mut row = Vec::with_capacity(MovieField::ALL.len() + 1);
            row.push(index.to_string());
            row.extend(record.fields().map(|(_, value)| self.cell(value)));
            csv.write_record(&row)?;
        }

        csv.flush()?;
        Ok(())
    }

    fn cell(&self, value: FieldValue<'_>) -> String {
        match value {
            FieldValue::Absent => String::new(),
            FieldValue::Text(text) => text.to_string(),
            FieldValue::List(items) => self.genre_format.render(items),
        }
    }
}

impl CatalogExporter for CsvExporter {
    fn export(&self, records: &[MovieRecord], path: &Path) -> OutputResult<()> {
        let file = std::fs::File::create(path)?;
        self.write_to(records, file)?;

        tracing::debug!("Exported {} rows to {}", records.len(), path.display());
        Ok(())
    }
}
