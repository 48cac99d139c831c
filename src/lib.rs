//! # Redactor
//!
//! Draft a scientific article, collect an APA bibliography, optionally pull
//! text from a photographed page with OCR, and export the result as a Word
//! document and a LaTeX source file.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`models`]: Core data structures (ArticleRecord, Citation, Variant)
//! - [`bibliography`]: Append-only citation store with sorted presentation
//! - [`export`]: Word and LaTeX renders sharing one section layout
//! - [`utils`]: Citation formatting, OCR and session state
//! - [`config`]: Configuration management
//! - [`ui`]: Terminal output for the command-line front end

pub mod bibliography;
pub mod config;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use bibliography::Bibliography;
pub use export::{render_docx, render_markup, Layout};
pub use models::{ArticleRecord, Citation};
pub use utils::format_citation;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
