//! APA 7th reference formatting.
//!
//! The formatter performs no validation: empty fields render as empty
//! segments, so an all-empty reference comes out as `" (). ."`.

use crate::models::{Citation, CitationRequest};

/// Format a reference line in APA 7th style
/// Format: Author (Year). Title. Publisher. URL
///
/// `publisher` and `url` are appended only when non-empty.
pub fn format_citation(
    author: &str,
    year: &str,
    title: &str,
    publisher: &str,
    url: &str,
) -> Citation {
    let mut cita = format!("{} ({}). {}.", author, year, title);
    if !publisher.is_empty() {
        cita.push_str(&format!(" {}.", publisher));
    }
    if !url.is_empty() {
        cita.push_str(&format!(" {}", url));
    }
    Citation::from_text(cita)
}

/// Format a citation request, honoring its source kind
pub fn format_request(request: &CitationRequest) -> Citation {
    format_citation(
        &request.author,
        &request.year,
        &request.title,
        &request.publisher,
        request.effective_url(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SourceKind;

    #[test]
    fn test_format_with_publisher() {
        let cita = format_citation("Pérez, J.", "2021", "Teoría general", "Editorial Norte", "");
        assert_eq!(cita.as_str(), "Pérez, J. (2021). Teoría general. Editorial Norte.");
    }

    #[test]
    fn test_format_minimal() {
        let cita = format_citation("Alba, R.", "2019", "Estudio Y", "", "");
        assert_eq!(cita.as_str(), "Alba, R. (2019). Estudio Y.");
        assert!(cita.as_str().ends_with("Estudio Y."));
        assert!(cita.as_str().contains("(2019)"));
    }

    #[test]
    fn test_format_with_url_only() {
        let cita = format_citation("OMS", "2022", "Informe anual", "", "https://who.int/x");
        assert_eq!(cita.as_str(), "OMS (2022). Informe anual. https://who.int/x");
    }

    #[test]
    fn test_format_with_publisher_and_url() {
        let cita = format_citation(
            "Gómez, P.",
            "2020",
            "Redes",
            "Revista Andina",
            "https://doi.org/10.1/abc",
        );
        assert_eq!(
            cita.as_str(),
            "Gómez, P. (2020). Redes. Revista Andina. https://doi.org/10.1/abc"
        );
    }

    #[test]
    fn test_format_all_empty_is_degenerate_but_well_formed() {
        let cita = format_citation("", "", "", "", "");
        assert_eq!(cita.as_str(), " (). .");
    }

    #[test]
    fn test_format_request_book_ignores_url() {
        let req = CitationRequest::new(SourceKind::Book, "Saldaña, M. Y.", "2015", "Métodos")
            .publisher("Mc Graw Hill")
            .url("https://ignored.example");
        assert_eq!(
            format_request(&req).as_str(),
            "Saldaña, M. Y. (2015). Métodos. Mc Graw Hill."
        );
    }

    #[test]
    fn test_format_request_journal_keeps_url() {
        let req = CitationRequest::new(SourceKind::Journal, "Lee, K.", "2023", "Suelos")
            .publisher("Agro")
            .url("https://agro.example/1");
        assert_eq!(
            format_request(&req).as_str(),
            "Lee, K. (2023). Suelos. Agro. https://agro.example/1"
        );
    }
}
