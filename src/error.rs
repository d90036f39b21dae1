// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PaperError>;

pub const PAPER_NOT_FOUND: &str = "Paper not found";

#[derive(Error, Debug)]
pub enum PaperError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("File operation failed for {path}: {source}")]
    FileOperation {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Completion service error: {0}")]
    Llm(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl PaperError {
    /// True for failures caused by what the client sent rather than by the service.
    pub fn is_client_error(&self) -> bool {
        matches!(self, PaperError::Validation(_) | PaperError::Pdf(_))
    }
}

impl From<serde_json::Error> for PaperError {
    fn from(err: serde_json::Error) -> Self {
        PaperError::Serialization(err.to_string())
    }
}
