//! Core data models for articles and citations.

mod article;
mod citation;

pub use article::{ArticleBuilder, ArticleRecord, Variant};
pub use citation::{Citation, CitationRequest, SourceKind};
