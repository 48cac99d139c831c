//! Article export to Word and LaTeX.
//!
//! Both renders take the same inputs (article record, bibliography, layout)
//! and produce equivalent section structure. The bibliography is listed in
//! [`Bibliography::sorted_view`] order in both, and is left out entirely when
//! empty.
//!
//! ```rust
//! use redactor::bibliography::Bibliography;
//! use redactor::export::{render_markup, Layout};
//! use redactor::models::{ArticleBuilder, Variant};
//!
//! let article = ArticleBuilder::new("Mi Estudio").resumen("Breve resumen").build();
//! let tex = render_markup(&article, &Bibliography::new(), &Layout::for_variant(Variant::Monolingual));
//! assert!(tex.contains("\\title{Mi Estudio}"));
//! ```

mod docx;
mod latex;
mod layout;

pub use layout::{boilerplate, ContentSource, Layout, SectionSpec};

use crate::bibliography::Bibliography;
use crate::models::ArticleRecord;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while producing or writing export artifacts
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to build Word document: {0}")]
    Docx(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Which artifacts to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Word document only
    Docx,
    /// LaTeX source only
    Tex,
    /// Both artifacts
    #[default]
    Both,
}

impl ExportFormat {
    pub fn includes_docx(&self) -> bool {
        matches!(self, ExportFormat::Docx | ExportFormat::Both)
    }

    pub fn includes_tex(&self) -> bool {
        matches!(self, ExportFormat::Tex | ExportFormat::Both)
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Docx => write!(f, "docx"),
            ExportFormat::Tex => write!(f, "tex"),
            ExportFormat::Both => write!(f, "both"),
        }
    }
}

/// A rendered file ready to be saved or downloaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Suggested filename, `{title}.docx` or `{title}.tex`
    pub filename: String,

    /// File contents
    pub bytes: Vec<u8>,
}

impl Artifact {
    /// Save under `dir`. Path separators in the filename are replaced so the
    /// artifact always lands directly inside `dir`.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        std::fs::create_dir_all(dir)?;
        let safe_name: String = self
            .filename
            .chars()
            .map(|c| if matches!(c, '/' | '\\') { '-' } else { c })
            .collect();
        let path = dir.join(safe_name);
        std::fs::write(&path, &self.bytes)?;
        tracing::info!(path = %path.display(), bytes = self.bytes.len(), "Wrote export");
        Ok(path)
    }
}

/// Render the article as a Word document
pub fn render_docx(
    article: &ArticleRecord,
    bibliography: &Bibliography,
    layout: &Layout,
) -> Result<Vec<u8>, ExportError> {
    docx::render(article, bibliography, layout)
}

/// Render the article as LaTeX source
pub fn render_markup(
    article: &ArticleRecord,
    bibliography: &Bibliography,
    layout: &Layout,
) -> String {
    latex::render(article, bibliography, layout)
}

/// Render the requested artifacts with their suggested filenames
pub fn export(
    article: &ArticleRecord,
    bibliography: &Bibliography,
    layout: &Layout,
    format: ExportFormat,
) -> Result<Vec<Artifact>, ExportError> {
    let mut artifacts = Vec::new();
    if format.includes_docx() {
        artifacts.push(Artifact {
            filename: article.docx_filename(),
            bytes: render_docx(article, bibliography, layout)?,
        });
    }
    if format.includes_tex() {
        artifacts.push(Artifact {
            filename: article.tex_filename(),
            bytes: render_markup(article, bibliography, layout).into_bytes(),
        });
    }
    tracing::debug!(
        variant = %layout.variant,
        format = %format,
        citations = bibliography.len(),
        "Exported article"
    );
    Ok(artifacts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ArticleBuilder, Variant};

    #[test]
    fn test_export_both_formats() {
        let article = ArticleBuilder::new("Mi Estudio").build();
        let artifacts = export(
            &article,
            &Bibliography::new(),
            &Layout::for_variant(Variant::Monolingual),
            ExportFormat::Both,
        )
        .unwrap();
        let names: Vec<&str> = artifacts.iter().map(|a| a.filename.as_str()).collect();
        assert_eq!(names, vec!["Mi Estudio.docx", "Mi Estudio.tex"]);
        // .docx is a zip container
        assert_eq!(&artifacts[0].bytes[..2], b"PK");
        assert!(String::from_utf8(artifacts[1].bytes.clone()).is_ok());
    }

    #[test]
    fn test_export_single_format() {
        let article = ArticleBuilder::new("T").build();
        let artifacts = export(
            &article,
            &Bibliography::new(),
            &Layout::default(),
            ExportFormat::Tex,
        )
        .unwrap();
        assert_eq!(artifacts.len(), 1);
        assert_eq!(artifacts[0].filename, "T.tex");
    }

    #[test]
    fn test_write_to_replaces_separators() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = Artifact {
            filename: "a/b\\c.tex".to_string(),
            bytes: b"x".to_vec(),
        };
        let path = artifact.write_to(dir.path()).unwrap();
        assert_eq!(path, dir.path().join("a-b-c.tex"));
        assert_eq!(std::fs::read(path).unwrap(), b"x");
    }

    #[test]
    fn test_format_flags() {
        assert!(ExportFormat::Both.includes_docx() && ExportFormat::Both.includes_tex());
        assert!(!ExportFormat::Docx.includes_tex());
        assert!(!ExportFormat::Tex.includes_docx());
    }
}
