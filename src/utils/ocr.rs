//! Optical character recognition of photographed pages.
//!
//! The engine is a black box behind [`TextRecognizer`]: image bytes in,
//! ordered lines of text out. The call blocks until the engine finishes and
//! yields either all lines or an error; there are no partial results.
//!
//! [`TesseractRecognizer`] drives the `tesseract` command-line tool, which
//! must be installed on the system.

use std::io::Write;
use std::path::PathBuf;
use std::process::Command;
use std::sync::OnceLock;
use thiserror::Error;

/// Errors that can occur during recognition
#[derive(Debug, Error)]
pub enum OcrError {
    #[error("OCR not available: `{0}` could not be run")]
    NotAvailable(String),

    #[error("OCR failed: {0}")]
    Failed(String),

    #[error("Image too large: {size} bytes (limit {limit})")]
    ImageTooLarge { size: usize, limit: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Something that turns an image into lines of text
pub trait TextRecognizer {
    /// Recognize text in `image`, returning lines in reading order
    fn recognize(&self, image: &[u8]) -> Result<Vec<String>, OcrError>;
}

/// Run a recognizer and join its lines with newlines.
///
/// Returns an empty string when nothing was recognized.
pub fn recognize_text(recognizer: &dyn TextRecognizer, image: &[u8]) -> Result<String, OcrError> {
    let lines = recognizer.recognize(image)?;
    tracing::debug!(lines = lines.len(), "Recognized text");
    Ok(lines.join("\n"))
}

/// Recognizer backed by the `tesseract` binary
#[derive(Debug)]
pub struct TesseractRecognizer {
    binary: String,
    language: String,
    max_image_bytes: usize,
    available: OnceLock<bool>,
}

impl TesseractRecognizer {
    /// Create a recognizer for `binary` using the tesseract language code `language`
    pub fn new(binary: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            language: language.into(),
            max_image_bytes: 10 * 1024 * 1024,
            available: OnceLock::new(),
        }
    }

    /// Reject images larger than `bytes`
    pub fn with_max_image_bytes(mut self, bytes: usize) -> Self {
        self.max_image_bytes = bytes;
        self
    }

    /// Check once whether the binary can be run
    pub fn is_available(&self) -> bool {
        *self.available.get_or_init(|| {
            let ok = Command::new(&self.binary)
                .arg("--version")
                .output()
                .map(|out| out.status.success())
                .unwrap_or(false);
            if !ok {
                tracing::warn!(
                    binary = %self.binary,
                    "OCR not available. Install tesseract-ocr for text recognition."
                );
            }
            ok
        })
    }

    fn scratch_file(&self, image: &[u8]) -> Result<tempfile::NamedTempFile, OcrError> {
        let mut file = tempfile::Builder::new()
            .prefix("redactor-ocr-")
            .suffix(".img")
            .tempfile()?;
        file.write_all(image)?;
        file.flush()?;
        Ok(file)
    }
}

impl Default for TesseractRecognizer {
    fn default() -> Self {
        Self::new("tesseract", "spa")
    }
}

impl TextRecognizer for TesseractRecognizer {
    fn recognize(&self, image: &[u8]) -> Result<Vec<String>, OcrError> {
        if image.is_empty() {
            return Ok(Vec::new());
        }
        if image.len() > self.max_image_bytes {
            return Err(OcrError::ImageTooLarge {
                size: image.len(),
                limit: self.max_image_bytes,
            });
        }

        let scratch = self.scratch_file(image)?;
        let path: PathBuf = scratch.path().to_path_buf();
        tracing::info!(
            binary = %self.binary,
            language = %self.language,
            bytes = image.len(),
            "Running OCR"
        );

        let output = match Command::new(&self.binary)
            .arg(&path)
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            .output()
        {
            Ok(output) => output,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(OcrError::NotAvailable(self.binary.clone()));
            }
            Err(e) => return Err(OcrError::Io(e)),
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(OcrError::Failed(stderr));
        }

        Ok(split_lines(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// Recognizer that returns fixed lines, for dry runs and tests
#[derive(Debug, Clone, Default)]
pub struct StaticRecognizer {
    lines: Vec<String>,
}

impl StaticRecognizer {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }
}

impl TextRecognizer for StaticRecognizer {
    fn recognize(&self, _image: &[u8]) -> Result<Vec<String>, OcrError> {
        Ok(self.lines.clone())
    }
}

/// Trimmed, non-blank lines of engine output
fn split_lines(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}
