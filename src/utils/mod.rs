//! Utility modules supporting article drafting.
//!
//! - [`format_citation`]: Format a reference line in APA 7th style
//! - [`format_request`]: Format a reference from form data, honoring its source kind
//! - [`TextRecognizer`]: Black-box OCR engine, with [`TesseractRecognizer`] as the real one
//! - [`recognize_text`]: Run OCR and join the recognized lines
//! - [`Session`] / [`SessionStore`]: Explicit session state and its JSON file
//!
//! # Citations
//!
//! ```rust
//! use redactor::utils::format_citation;
//!
//! let cita = format_citation("Pérez, J.", "2021", "Teoría general", "Editorial Norte", "");
//! assert_eq!(cita.as_str(), "Pérez, J. (2021). Teoría general. Editorial Norte.");
//! ```
//!
//! # OCR
//!
//! ```rust,no_run
//! use redactor::utils::{recognize_text, TesseractRecognizer};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let image = std::fs::read("pagina.jpg")?;
//! let text = recognize_text(&TesseractRecognizer::default(), &image)?;
//! println!("{text}");
//! # Ok(())
//! # }
//! ```

mod cite;
mod ocr;
mod session;

pub use cite::{format_citation, format_request};
pub use ocr::{recognize_text, OcrError, StaticRecognizer, TesseractRecognizer, TextRecognizer};
pub use session::{Session, SessionError, SessionStore};
