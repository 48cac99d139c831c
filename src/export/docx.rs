//! Word (.docx) rendering with docx-rs.
//!
//! The document carries fixed default fonts, three paragraph styles (title,
//! heading, bullet list item) and a single bullet numbering used for the
//! bibliography.

use super::layout::{boilerplate, Layout};
use super::ExportError;
use crate::bibliography::Bibliography;
use crate::models::ArticleRecord;
use docx_rs::{
    AbstractNumbering, AlignmentType, BreakType, Docx, IndentLevel, Level, LevelJc, LevelText,
    NumberFormat, Numbering, NumberingId, PageMargin, Paragraph, Run, RunFonts,
    SpecialIndentType, Start, Style, StyleType,
};
use std::io::Cursor;

/// Paragraph style ids
const STYLE_TITLE: &str = "Title";
const STYLE_HEADING: &str = "Heading1";
const STYLE_LIST_BULLET: &str = "ListBullet";

/// Numbering instance used for bibliography bullets
const BULLET_ABSTRACT_ID: usize = 0;
const BULLET_NUM_ID: usize = 1;

/// Render the article as a complete .docx package
pub fn render(
    article: &ArticleRecord,
    bibliography: &Bibliography,
    layout: &Layout,
) -> Result<Vec<u8>, ExportError> {
    let mut docx = base_document().add_paragraph(paragraph(&article.title).style(STYLE_TITLE));

    for section in layout.sections {
        docx = docx
            .add_paragraph(paragraph(section.heading).style(STYLE_HEADING))
            .add_paragraph(paragraph(section.source.resolve(article)));
    }

    if !bibliography.is_empty() {
        let heading = paragraph(boilerplate::BIBLIOGRAPHY_HEADING).style(STYLE_HEADING);
        docx = docx.add_paragraph(heading);
        for citation in bibliography.sorted_view() {
            docx = docx.add_paragraph(
                paragraph(citation.as_str())
                    .style(STYLE_LIST_BULLET)
                    .numbering(NumberingId::new(BULLET_NUM_ID), IndentLevel::new(0)),
            );
        }
    }

    let mut buf = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buf)
        .map_err(|e| ExportError::Docx(e.to_string()))?;

    let bytes = buf.into_inner();
    tracing::debug!(
        title = %article.title,
        bytes = bytes.len(),
        "Rendered Word document"
    );
    Ok(bytes)
}

/// A4 page, fixed fonts, styles and the bullet numbering
fn base_document() -> Docx {
    let font = boilerplate::DEFAULT_FONT;
    let fonts = RunFonts::new()
        .ascii(font)
        .hi_ansi(font)
        .east_asia(font)
        .cs(font);

    let bullet = Level::new(
        0,
        Start::new(1),
        NumberFormat::new("bullet"),
        LevelText::new("•"),
        LevelJc::new("left"),
    )
    .indent(Some(720), Some(SpecialIndentType::Hanging(360)), None, None);

    Docx::new()
        .default_fonts(fonts)
        // half-points
        .default_size(boilerplate::DEFAULT_FONT_SIZE_PT * 2)
        .page_size(11906, 16838)
        .page_margin(
            PageMargin::new()
                .top(1417)
                .right(1417)
                .bottom(1417)
                .left(1417)
                .header(708)
                .footer(708)
                .gutter(0),
        )
        .add_style(
            Style::new(STYLE_TITLE, StyleType::Paragraph)
                .name("Title")
                .align(AlignmentType::Center)
                .bold()
                .size(32),
        )
        .add_style(
            Style::new(STYLE_HEADING, StyleType::Paragraph)
                .name("heading 1")
                .bold()
                .size(28),
        )
        .add_style(Style::new(STYLE_LIST_BULLET, StyleType::Paragraph).name("List Bullet"))
        .add_abstract_numbering(AbstractNumbering::new(BULLET_ABSTRACT_ID).add_level(bullet))
        .add_numbering(Numbering::new(BULLET_NUM_ID, BULLET_ABSTRACT_ID))
}

fn paragraph(text: &str) -> Paragraph {
    Paragraph::new().add_run(text_run(text))
}

/// One run for the whole text. Newlines become line breaks and form feeds
/// become page breaks; characters XML 1.0 cannot carry are dropped.
fn text_run(text: &str) -> Run {
    let mut run = Run::new();
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            run = run.add_break(BreakType::TextWrapping);
        }
        for (j, page) in line.split('\u{000C}').enumerate() {
            if j > 0 {
                run = run.add_break(BreakType::Page);
            }
            let clean: String = page.chars().filter(|&c| is_xml_char(c)).collect();
            run = run.add_text(clean);
        }
    }
    run
}

/// XML 1.0 `Char` production, minus CR and LF which never reach a text node
fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..)
}
