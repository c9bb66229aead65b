pub mod db;

pub use db::DbScoreStore;

use async_trait::async_trait;
use std::error::Error;
use std::fmt;

use crate::model::ScoreRecord;

#[derive(Debug, Clone)]
pub struct StorageError {
    message: String,
}

impl StorageError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for StorageError {}

impl From<String> for StorageError {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for StorageError {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// One persisted round, as read back from the user's score log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredScore {
    pub id: i64,
    /// Assigned by the database at insert time.
    pub created_at: String,
    pub record: ScoreRecord,
}

/// Append-only score log keyed by user identity. Every confirmed save is a
/// new entry; nothing is ever updated in place.
#[async_trait]
pub trait ScoreStore: Send + Sync {
    async fn append_score(&self, user_id: &str, record: &ScoreRecord)
    -> Result<i64, StorageError>;

    async fn scores_for_user(&self, user_id: &str) -> Result<Vec<StoredScore>, StorageError>;
}
