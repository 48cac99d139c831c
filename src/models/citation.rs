//! Citation model: a single rendered reference line and the form data it is built from.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of work being cited
///
/// The kind decides how the publisher field is read and whether a URL is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Printed book; the publisher field is the publishing house
    Book,
    /// Journal article; the publisher field is the journal name
    Journal,
    /// Web page; the publisher field is the site or institution
    Website,
    /// Official or institutional report
    Report,
}

impl SourceKind {
    /// Returns the display name shown to the author
    pub fn name(&self) -> &'static str {
        match self {
            SourceKind::Book => "Libro",
            SourceKind::Journal => "Artículo de Revista",
            SourceKind::Website => "Sitio Web",
            SourceKind::Report => "Informe Oficial",
        }
    }

    /// Label of the publisher field for this kind
    pub fn publisher_label(&self) -> &'static str {
        match self {
            SourceKind::Book => "Editorial",
            _ => "Nombre de la Revista o Institución",
        }
    }

    /// Whether a URL is kept for this kind
    pub fn accepts_url(&self) -> bool {
        !matches!(self, SourceKind::Book)
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A formatted reference line
///
/// Only the rendered text is retained. Once created the text never changes.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Citation(String);

impl Citation {
    /// Wrap an already formatted reference line
    pub fn from_text(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// The reference line
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Citation {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Citation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raw form data for one reference, before formatting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationRequest {
    /// Kind of work
    pub kind: SourceKind,

    /// Author(s) as typed, e.g. "Saldaña, M. Y."
    pub author: String,

    /// Publication year as typed
    pub year: String,

    /// Title of the work
    pub title: String,

    /// Publisher, journal or institution (may be empty)
    #[serde(default)]
    pub publisher: String,

    /// URL (may be empty; dropped for books)
    #[serde(default)]
    pub url: String,
}

impl CitationRequest {
    /// Create a request with the required fields
    pub fn new(
        kind: SourceKind,
        author: impl Into<String>,
        year: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            author: author.into(),
            year: year.into(),
            title: title.into(),
            publisher: String::new(),
            url: String::new(),
        }
    }

    /// Set the publisher / journal / institution
    pub fn publisher(mut self, publisher: impl Into<String>) -> Self {
        self.publisher = publisher.into();
        self
    }

    /// Set the URL
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// The URL that will actually be rendered for this kind
    pub fn effective_url(&self) -> &str {
        if self.kind.accepts_url() {
            &self.url
        } else {
            ""
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_drops_url() {
        let req = CitationRequest::new(SourceKind::Book, "Ruiz, A.", "2018", "Manual")
            .url("https://example.org");
        assert_eq!(req.effective_url(), "");

        let req = CitationRequest::new(SourceKind::Website, "Ruiz, A.", "2018", "Manual")
            .url("https://example.org");
        assert_eq!(req.effective_url(), "https://example.org");
    }

    #[test]
    fn test_citation_serializes_as_plain_string() {
        let citation = Citation::from_text("Alba, R. (2019). Estudio Y.");
        let json = serde_json::to_string(&citation).unwrap();
        assert_eq!(json, "\"Alba, R. (2019). Estudio Y.\"");
    }

    #[test]
    fn test_source_kind_names() {
        assert_eq!(SourceKind::Journal.to_string(), "Artículo de Revista");
        assert_eq!(SourceKind::Book.publisher_label(), "Editorial");
    }
}
