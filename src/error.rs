use crate::storage::StorageError;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum AppError {
    /// User backed out of a picker or preview. Never reported as a failure.
    #[error("cancelled")]
    Cancelled,
    #[error("camera error: {0}")]
    Device(String),
    #[error("extraction error: {0}")]
    Extraction(String),
    #[error("save error: {0}")]
    Persistence(String),
    #[error("not signed in")]
    Unauthenticated,
    #[error("parse error: {0}")]
    Parse(String),
    #[error("{0}")]
    Other(String),
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        Self::Persistence(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        Self::Extraction(err.to_string())
    }
}

impl From<String> for AppError {
    fn from(err: String) -> Self {
        Self::Other(err)
    }
}

impl From<&str> for AppError {
    fn from(err: &str) -> Self {
        Self::Other(err.to_string())
    }
}
