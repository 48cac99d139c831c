//! Configuration file support for redactor.
//!
//! Reads and writes the TOML file directly, without environment overrides.
//! Used to create a starter file and to show the stored settings.
//!
//! # Configuration File Format
//!
//! ```toml
//! [export]
//! variant = "monolingual"   # or "bilingual"
//! format = "both"           # "docx", "tex" or "both"
//! output_dir = "."
//!
//! [ocr]
//! enabled = true
//! binary = "tesseract"
//! language = "spa"
//! max_image_size_mb = 10
//!
//! [session]
//! path = "~/.config/redactor/session.json"
//!
//! [logging]
//! level = "info"
//! format = "json"
//! ```

use super::Config;
use std::path::Path;

/// Read a configuration file
pub fn read_config_file(path: &Path) -> Result<Config, ConfigFileError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigFileError::Io(e.to_string()))?;

    toml::from_str(&content).map_err(|e| ConfigFileError::Parse(e.to_string()))
}

/// Write a configuration file, creating parent directories
pub fn save_config(config: &Config, path: &Path) -> Result<(), ConfigFileError> {
    let content =
        toml::to_string_pretty(config).map_err(|e| ConfigFileError::Serialize(e.to_string()))?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ConfigFileError::Io(e.to_string()))?;
    }
    std::fs::write(path, content).map_err(|e| ConfigFileError::Io(e.to_string()))
}

/// Configuration file errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Serialize error: {0}")]
    Serialize(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Variant;
    use std::path::PathBuf;
    use tempfile::tempdir;

    #[test]
    fn test_config_file_save_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sub/config.toml");

        let mut config = Config::default();
        config.export.variant = Variant::Bilingual;
        config.ocr.language = "eng".to_string();
        config.session.path = Some(PathBuf::from("/tmp/s.json"));

        save_config(&config, &path).unwrap();

        let loaded = read_config_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[logging]\nlevel = \"debug\"\n").unwrap();

        let config = read_config_file(&path).unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.ocr.binary, "tesseract");
    }

    #[test]
    fn test_config_file_nonexistent() {
        let result = read_config_file(Path::new("/nonexistent/config.toml"));
        assert!(matches!(result, Err(ConfigFileError::Io(_))));
    }

    #[test]
    fn test_config_file_invalid_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("invalid.toml");

        std::fs::write(&path, "invalid = toml = content").unwrap();

        let result = read_config_file(&path);
        assert!(matches!(result, Err(ConfigFileError::Parse(_))));
    }
}
