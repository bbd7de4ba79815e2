use std::path::PathBuf;
use thiserror::Error;

/// Result type for curriculum operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors raised while loading, validating or editing the curriculum
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read curriculum file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write curriculum file {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid curriculum JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Duplicate chapter id: {0}")]
    DuplicateChapter(String),

    #[error("Duplicate lesson id: {0}")]
    DuplicateLesson(String),

    #[error("Chapter not found: {0}")]
    ChapterNotFound(String),

    #[error("Unknown language '{0}' (expected python, sql or r)")]
    UnknownLanguage(String),
}
