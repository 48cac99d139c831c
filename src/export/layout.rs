//! Section layouts and the static text shared by both export formats.

use crate::models::{ArticleRecord, Variant};

/// Fixed text that does not depend on the article.
///
/// These are static templates: the introduction and conclusions of every
/// export carry exactly this wording regardless of what the author typed.
pub mod boilerplate {
    /// Introduction paragraph
    pub const INTRODUCCION: &str = "La presente investigación aborda el problema planteado a partir \
de los antecedentes teóricos y empíricos disponibles, y delimita los objetivos que orientan el \
desarrollo del estudio.";

    /// Conclusions paragraph
    pub const CONCLUSIONES: &str = "Los resultados obtenidos permiten dar respuesta a los objetivos \
planteados y abren nuevas líneas de investigación para trabajos futuros en el área.";

    /// Author declared in the LaTeX title block
    pub const AUTHOR_NAME: &str = "Investigador Principal";

    /// Heading of the reference list in both formats
    pub const BIBLIOGRAPHY_HEADING: &str = "BIBLIOGRAFÍA";

    /// Default paragraph font of the Word export
    pub const DEFAULT_FONT: &str = "Times New Roman";

    /// Default paragraph size of the Word export, in points
    pub const DEFAULT_FONT_SIZE_PT: usize = 12;
}

/// Where the paragraph under a heading comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentSource {
    /// Spanish abstract, verbatim
    Resumen,
    /// English abstract, verbatim
    AbstractEn,
    /// Methodology label, verbatim
    Methodology,
    /// Body / results text, verbatim
    Body,
    /// Static text, independent of the article
    Static(&'static str),
}

impl ContentSource {
    /// Resolve the paragraph text for an article
    pub fn resolve<'a>(&self, article: &'a ArticleRecord) -> &'a str {
        match *self {
            ContentSource::Resumen => &article.resumen,
            ContentSource::AbstractEn => &article.abstract_en,
            ContentSource::Methodology => &article.methodology,
            ContentSource::Body => &article.body,
            ContentSource::Static(text) => text,
        }
    }

    /// Whether the text comes from the author rather than a template
    pub fn is_verbatim(&self) -> bool {
        !matches!(self, ContentSource::Static(_))
    }
}

/// One heading and the source of its paragraph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionSpec {
    pub heading: &'static str,
    pub source: ContentSource,
    /// Abstract-like sections are not numbered in LaTeX
    pub unnumbered: bool,
}

const fn section(heading: &'static str, source: ContentSource) -> SectionSpec {
    SectionSpec {
        heading,
        source,
        unnumbered: false,
    }
}

const fn abstract_section(heading: &'static str, source: ContentSource) -> SectionSpec {
    SectionSpec {
        heading,
        source,
        unnumbered: true,
    }
}

const MONOLINGUAL_SECTIONS: &[SectionSpec] = &[
    abstract_section("RESUMEN", ContentSource::Resumen),
    section("INTRODUCCIÓN", ContentSource::Static(boilerplate::INTRODUCCION)),
    section("METODOLOGÍA", ContentSource::Methodology),
    section("RESULTADOS Y DISCUSIÓN", ContentSource::Body),
    section("CONCLUSIONES", ContentSource::Static(boilerplate::CONCLUSIONES)),
];

const BILINGUAL_SECTIONS: &[SectionSpec] = &[
    abstract_section("RESUMEN", ContentSource::Resumen),
    abstract_section("ABSTRACT", ContentSource::AbstractEn),
    section("INTRODUCCIÓN", ContentSource::Static(boilerplate::INTRODUCCION)),
    section("METODOLOGÍA", ContentSource::Methodology),
    section("RESULTADOS", ContentSource::Body),
    section("CONCLUSIONES", ContentSource::Static(boilerplate::CONCLUSIONES)),
];

/// Ordered section list for a language variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub variant: Variant,
    pub sections: &'static [SectionSpec],
}

impl Layout {
    pub fn for_variant(variant: Variant) -> Self {
        let sections = match variant {
            Variant::Monolingual => MONOLINGUAL_SECTIONS,
            Variant::Bilingual => BILINGUAL_SECTIONS,
        };
        Self { variant, sections }
    }

    /// Headings in render order
    pub fn headings(&self) -> Vec<&'static str> {
        self.sections.iter().map(|s| s.heading).collect()
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::for_variant(Variant::default())
    }
}
