//! Drafting session state and its on-disk store.
//!
//! A session holds the bibliography collected so far and the last submitted
//! article draft. It is passed explicitly to whoever needs it; nothing here is
//! global. The store keeps one JSON file in the config directory so that
//! separate CLI invocations share the same session.

use crate::bibliography::Bibliography;
use crate::models::{ArticleRecord, Citation};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading or saving a session
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Session file is corrupt: {0}")]
    Parse(#[from] serde_json::Error),
}

/// State of one drafting session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Citations added during this session
    #[serde(default)]
    pub bibliography: Bibliography,

    /// Last submitted article
    #[serde(default)]
    pub draft: Option<ArticleRecord>,

    /// Whether the article form has been submitted at least once
    #[serde(default)]
    pub submitted: bool,
}

impl Session {
    /// Start an empty session
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a citation to the session bibliography
    pub fn add_citation(&mut self, citation: Citation) {
        self.bibliography.append(citation);
    }

    /// Record a submitted article and return it
    pub fn submit(&mut self, article: ArticleRecord) -> &ArticleRecord {
        self.submitted = true;
        self.draft.insert(article)
    }
}

/// JSON file store for a [`Session`]
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Store at the default location, `<config_dir>/redactor/session.json`
    pub fn new() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("redactor");
        Self {
            path: config_dir.join("session.json"),
        }
    }

    /// Store at an explicit path
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the session, or start an empty one if none exists yet
    pub fn load(&self) -> Result<Session, SessionError> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "No session file, starting fresh");
            return Ok(Session::new());
        }
        let content = fs::read_to_string(&self.path)?;
        let session: Session = serde_json::from_str(&content)?;
        tracing::debug!(
            path = %self.path.display(),
            citations = session.bibliography.len(),
            "Loaded session"
        );
        Ok(session)
    }

    /// Persist the session, creating parent directories as needed
    pub fn save(&self, session: &Session) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// End the session by discarding its file
    pub fn reset(&self) -> Result<(), SessionError> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
            tracing::info!(path = %self.path.display(), "Session discarded");
        }
        Ok(())
    }

    /// Get session file path (for external access)
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_missing_file_gives_empty_session() {
        let dir = tempdir().unwrap();
        let store = SessionStore::with_path(dir.path().join("session.json"));
        let session = store.load().unwrap();
        assert!(session.bibliography.is_empty());
        assert!(!session.submitted);
        assert!(session.draft.is_none());
    }

    #[test]
    fn test_save_load_keeps_insertion_order() {
        let dir = tempdir().unwrap();
        let store = SessionStore::with_path(dir.path().join("nested/session.json"));

        let mut session = Session::new();
        session.add_citation(Citation::from_text("Zapata, L. (2020). Estudio X."));
        session.add_citation(Citation::from_text("Alba, R. (2019). Estudio Y."));
        store.save(&session).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, session);
        assert_eq!(
            loaded.bibliography.entries()[0].as_str(),
            "Zapata, L. (2020). Estudio X."
        );
    }

    #[test]
    fn test_submit_sets_flag() {
        let mut session = Session::new();
        let title = session.submit(ArticleRecord::new("Mi Estudio")).title.clone();
        assert_eq!(title, "Mi Estudio");
        assert!(session.submitted);
    }

    #[test]
    fn test_reset_removes_file() {
        let dir = tempdir().unwrap();
        let store = SessionStore::with_path(dir.path().join("session.json"));
        store.save(&Session::new()).unwrap();
        assert!(store.path().exists());

        store.reset().unwrap();
        assert!(!store.path().exists());
        // resetting twice is fine
        store.reset().unwrap();
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{ not json").unwrap();
        let result = SessionStore::with_path(path).load();
        assert!(matches!(result, Err(SessionError::Parse(_))));
    }
}
