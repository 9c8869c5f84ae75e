// File: src/config.rs
use crate::error::{LipiError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Environment variable naming the settings file.
pub const CONFIG_ENV: &str = "LIPI_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "lipi.json";

/// Runtime settings shared by the binaries. Every field has a default, so a
/// partial (or absent) file is fine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// JSON table resource replacing the built-in tables.
    pub table_path: Option<PathBuf>,
    pub english_corpus: PathBuf,
    pub maithili_corpus: PathBuf,
    /// Bincode snapshot of the bigram models, rebuilt from the corpora when
    /// missing.
    pub model_cache: Option<PathBuf>,
    /// Used when `RUST_LOG` is not set.
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            table_path: None,
            english_corpus: PathBuf::from("eng_corpus.txt"),
            maithili_corpus: PathBuf::from("maithili_corpus.txt"),
            model_cache: None,
            log_filter: "lipi_core=info".to_string(),
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// The file named by `LIPI_CONFIG`, or `lipi.json`.
    pub fn env_path() -> PathBuf {
        std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
    }

    /// A missing file yields the defaults; a malformed one is an error.
    pub fn from_env() -> Result<Self> {
        let path = Self::env_path();
        if path.exists() {
            Self::load(&path)
        } else {
            info!(path = %path.display(), "no settings file, using defaults");
            Ok(Self::default())
        }
    }

    /// Never fails: a missing file yields the defaults, and a malformed one
    /// yields the defaults together with the load error so the caller can
    /// report it once logging is up.
    pub fn load_or_default(path: &Path) -> (Self, Option<LipiError>) {
        if !path.exists() {
            return (Self::default(), None);
        }
        match Self::load(path) {
            Ok(settings) => (settings, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"table_path": "tables.json"}}"#).unwrap();
        let settings = Settings::load(file.path()).unwrap();
        assert_eq!(settings.table_path, Some(PathBuf::from("tables.json")));
        assert_eq!(settings.english_corpus, PathBuf::from("eng_corpus.txt"));
        assert_eq!(settings.log_filter, "lipi_core=info");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(Settings::load(file.path()).is_err());
    }

    #[test]
    fn malformed_file_falls_back_to_defaults_with_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        let (settings, error) = Settings::load_or_default(file.path());
        assert_eq!(settings, Settings::default());
        assert!(matches!(error, Some(LipiError::Json(_))));
    }

    #[test]
    fn missing_file_falls_back_to_defaults_silently() {
        let dir = tempfile::tempdir().unwrap();
        let (settings, error) = Settings::load_or_default(&dir.path().join("absent.json"));
        assert_eq!(settings, Settings::default());
        assert!(error.is_none());
    }
}
