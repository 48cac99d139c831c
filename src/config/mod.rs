//! Configuration management.

mod file_config;

pub use file_config::{read_config_file, save_config, ConfigFileError};

use crate::export::ExportFormat;
use crate::models::Variant;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Export defaults
    pub export: ExportConfig,

    /// OCR engine settings
    pub ocr: OcrConfig,

    /// Session file location
    pub session: SessionConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// Export configuration
///
/// Font and size of the Word export are fixed and deliberately absent here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Abstract variant used when none is given on the command line
    #[serde(default)]
    pub variant: Variant,

    /// Artifacts produced when none is given on the command line
    #[serde(default)]
    pub format: ExportFormat,

    /// Directory exports are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            variant: Variant::default(),
            format: ExportFormat::default(),
            output_dir: default_output_dir(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

/// OCR configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrConfig {
    /// Whether OCR may be run at all
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Path or name of the tesseract binary
    #[serde(default = "default_ocr_binary")]
    pub binary: String,

    /// Tesseract language code
    #[serde(default = "default_ocr_language")]
    pub language: String,

    /// Largest accepted image (in MB)
    #[serde(default = "default_max_image_size")]
    pub max_image_size_mb: usize,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            binary: default_ocr_binary(),
            language: default_ocr_language(),
            max_image_size_mb: default_max_image_size(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_ocr_binary() -> String {
    "tesseract".to_string()
}

fn default_ocr_language() -> String {
    "spa".to_string()
}

fn default_max_image_size() -> usize {
    10
}

/// Session configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Session file; the config directory is used when unset
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// "json" for structured output, plain text otherwise
    #[serde(default)]
    pub format: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Load configuration from an optional file plus `REDACTOR_*` environment variables.
///
/// Nested keys use a double underscore, e.g. `REDACTOR_OCR__LANGUAGE=eng`.
pub fn load_config(path: Option<&Path>) -> Result<Config, config::ConfigError> {
    let mut builder = config::Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(config::File::from(path).format(config::FileFormat::Toml));
    }
    let settings = builder
        .add_source(
            config::Environment::with_prefix("REDACTOR")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize()
}

/// Look for a config file in the working directory, then the user config directory
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from("redactor.toml");
    if local.is_file() {
        return Some(local);
    }
    let user = default_config_path()?;
    user.is_file().then_some(user)
}

/// `<config_dir>/redactor/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("redactor").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.ocr.enabled);
        assert_eq!(config.ocr.language, "spa");
        assert_eq!(config.export.variant, Variant::Monolingual);
        assert_eq!(config.export.format, ExportFormat::Both);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("redactor.toml");
        std::fs::write(
            &path,
            r#"
[export]
variant = "bilingual"
format = "tex"
output_dir = "/tmp/articulos"

[ocr]
language = "eng"
"#,
        )
        .unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.export.variant, Variant::Bilingual);
        assert_eq!(config.export.format, ExportFormat::Tex);
        assert_eq!(config.export.output_dir, PathBuf::from("/tmp/articulos"));
        assert_eq!(config.ocr.language, "eng");
        assert_eq!(config.ocr.binary, "tesseract");
    }

    #[test]
    fn test_load_config_file_without_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("myconf");
        std::fs::write(&path, "[ocr]\nlanguage = \"eng\"\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.ocr.language, "eng");
    }

    #[test]
    fn test_load_config_missing_file_is_error() {
        let result = load_config(Some(Path::new("/nonexistent/redactor.toml")));
        assert!(result.is_err());
    }
}
