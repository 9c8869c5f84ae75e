// File: src/error.rs
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the engine and its resource loaders.
///
/// Transliteration itself never fails: unmapped characters are passed
/// through. Only direction parsing and resource loading produce errors.
#[derive(Debug, Error)]
pub enum LipiError {
    #[error("invalid direction '{0}': use 'roman_to_devanagari', 'devanagari_to_roman', or omit it for auto-detection")]
    InvalidDirection(String),

    #[error("invalid symbol table: {0}")]
    InvalidTable(String),

    #[error("corpus '{}' is missing or empty", path.display())]
    CorpusUnavailable { path: PathBuf },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("snapshot error: {0}")]
    Snapshot(#[from] bincode::Error),
}

pub type Result<T> = std::result::Result<T, LipiError>;
