//! LaTeX (.tex) rendering.
//!
//! Text is written through literally. Characters with special meaning in
//! LaTeX (`%`, `&`, `_`, `#`, `$`, `{`, `}`, `~`, `^`, `\`) are not escaped,
//! so the Word and LaTeX exports carry identical content.

use super::layout::{boilerplate, Layout};
use crate::bibliography::Bibliography;
use crate::models::ArticleRecord;

const PREAMBLE: &str = r"\documentclass[12pt,a4paper]{article}
\usepackage[utf8]{inputenc}
\usepackage[T1]{fontenc}
\usepackage[spanish]{babel}
\usepackage{mathptmx}
";

/// Render the article as LaTeX source
pub fn render(article: &ArticleRecord, bibliography: &Bibliography, layout: &Layout) -> String {
    let mut tex = String::from(PREAMBLE);

    tex.push('\n');
    tex.push_str(&format!("\\title{{{}}}\n", article.title));
    tex.push_str(&format!("\\author{{{}}}\n", boilerplate::AUTHOR_NAME));
    tex.push_str("\\date{\\today}\n\n");
    tex.push_str("\\begin{document}\n\\maketitle\n");

    for section in layout.sections {
        let command = if section.unnumbered {
            "section*"
        } else {
            "section"
        };
        tex.push_str(&format!("\n\\{}{{{}}}\n", command, section.heading));
        tex.push_str(section.source.resolve(article));
        tex.push('\n');
    }

    if !bibliography.is_empty() {
        tex.push_str(&format!(
            "\n\\section*{{{}}}\n\\begin{{itemize}}\n",
            boilerplate::BIBLIOGRAPHY_HEADING
        ));
        for citation in bibliography.sorted_view() {
            tex.push_str(&format!("\\item {}\n", citation));
        }
        tex.push_str("\\end{itemize}\n");
    }

    tex.push_str("\n\\end{document}\n");

    tracing::debug!(
        title = %article.title,
        chars = tex.len(),
        "Rendered LaTeX source"
    );
    tex
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ArticleBuilder, Citation, Variant};

    #[test]
    fn test_preamble_declares_encoding_and_language() {
        let tex = render(&ArticleRecord::new("T"), &Bibliography::new(), &Layout::default());
        assert!(tex.starts_with("\\documentclass"));
        assert!(tex.contains("\\usepackage[utf8]{inputenc}"));
        assert!(tex.contains("\\usepackage[spanish]{babel}"));
        assert!(tex.trim_end().ends_with("\\end{document}"));
    }

    #[test]
    fn test_author_is_fixed() {
        let tex = render(&ArticleRecord::new("T"), &Bibliography::new(), &Layout::default());
        assert!(tex.contains("\\author{Investigador Principal}"));
    }

    #[test]
    fn test_abstract_sections_are_unnumbered() {
        let article = ArticleBuilder::new("T")
            .resumen("Resumen")
            .abstract_en("Summary")
            .build();
        let tex = render(
            &article,
            &Bibliography::new(),
            &Layout::for_variant(Variant::Bilingual),
        );
        assert!(tex.contains("\\section*{RESUMEN}\nResumen\n"));
        assert!(tex.contains("\\section*{ABSTRACT}\nSummary\n"));
        assert!(tex.contains("\\section{METODOLOGÍA}"));
    }

    #[test]
    fn test_special_characters_pass_through() {
        let article = ArticleBuilder::new("50% & más_datos").body("$x^2$ # {a}").build();
        let tex = render(&article, &Bibliography::new(), &Layout::default());
        assert!(tex.contains("\\title{50% & más_datos}"));
        assert!(tex.contains("$x^2$ # {a}"));
    }

    #[test]
    fn test_bibliography_items_sorted() {
        let bib: Bibliography = ["b (2). B.", "a (1). A."]
            .into_iter()
            .map(Citation::from_text)
            .collect();
        let tex = render(&ArticleRecord::new("T"), &bib, &Layout::default());
        assert!(tex.contains(
            "\\section*{BIBLIOGRAFÍA}\n\\begin{itemize}\n\\item a (1). A.\n\\item b (2). B.\n\\end{itemize}\n"
        ));
    }
}
