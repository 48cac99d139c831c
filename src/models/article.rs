//! Article record assembled from the drafting form.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Abstract language variant of an article
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Spanish abstract only
    #[default]
    Monolingual,
    /// Spanish abstract plus an English abstract
    Bilingual,
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Monolingual => write!(f, "monolingual"),
            Variant::Bilingual => write!(f, "bilingual"),
        }
    }
}

/// A scientific article as submitted from the form
///
/// Transient: built fresh on each submission and handed to the exporter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    /// Article title
    pub title: String,

    /// Methodology label, e.g. "Cualitativa, estudio de caso"
    pub methodology: String,

    /// Spanish abstract (resumen)
    pub resumen: String,

    /// English abstract, used by the bilingual layout
    #[serde(default)]
    pub abstract_en: String,

    /// Body / results text
    pub body: String,
}

impl ArticleRecord {
    /// Create an empty record with a title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Suggested filename of the Word export
    pub fn docx_filename(&self) -> String {
        format!("{}.docx", self.title)
    }

    /// Suggested filename of the LaTeX export
    pub fn tex_filename(&self) -> String {
        format!("{}.tex", self.title)
    }

    /// Add recognized text to the body
    ///
    /// An empty body is replaced; otherwise the text is appended after a blank line.
    pub fn append_recognized_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if self.body.is_empty() {
            self.body = text.to_string();
        } else {
            self.body.push_str("\n\n");
            self.body.push_str(text);
        }
    }
}

/// Builder for constructing ArticleRecord values
#[derive(Debug, Clone, Default)]
pub struct ArticleBuilder {
    article: ArticleRecord,
}

impl ArticleBuilder {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            article: ArticleRecord::new(title),
        }
    }

    pub fn methodology(mut self, methodology: impl Into<String>) -> Self {
        self.article.methodology = methodology.into();
        self
    }

    pub fn resumen(mut self, resumen: impl Into<String>) -> Self {
        self.article.resumen = resumen.into();
        self
    }

    pub fn abstract_en(mut self, abstract_en: impl Into<String>) -> Self {
        self.article.abstract_en = abstract_en.into();
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.article.body = body.into();
        self
    }

    pub fn build(self) -> ArticleRecord {
        self.article
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggested_filenames() {
        let article = ArticleRecord::new("Mi Estudio");
        assert_eq!(article.docx_filename(), "Mi Estudio.docx");
        assert_eq!(article.tex_filename(), "Mi Estudio.tex");
    }

    #[test]
    fn test_append_recognized_text() {
        let mut article = ArticleRecord::new("T");
        article.append_recognized_text("");
        assert!(article.body.is_empty());

        article.append_recognized_text("línea 1\nlínea 2");
        assert_eq!(article.body, "línea 1\nlínea 2");

        article.append_recognized_text("línea 3");
        assert_eq!(article.body, "línea 1\nlínea 2\n\nlínea 3");
    }

    #[test]
    fn test_builder() {
        let article = ArticleBuilder::new("Título")
            .methodology("Cuantitativa")
            .resumen("Resumen breve")
            .body("Hallazgos")
            .build();
        assert_eq!(article.title, "Título");
        assert_eq!(article.methodology, "Cuantitativa");
        assert!(article.abstract_en.is_empty());
    }

    #[test]
    fn test_variant_default_is_monolingual() {
        assert_eq!(Variant::default(), Variant::Monolingual);
    }
}
