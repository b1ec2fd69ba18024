// Storage errors

use thiserror::Error;

/// Result type alias for storage operations
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors raised by the event store
#[derive(Debug, Error)]
pub enum StorageError {
    /// An event with this id is already stored; the existing row is untouched
    #[error("Event '{0}' already exists")]
    DuplicateId(String),

    /// Connection, I/O or query failure reported by SQLite
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StorageError {
    /// Classify a failed insert, recognising primary-key violations
    pub(crate) fn from_insert(err: sqlx::Error, id: &str) -> Self {
        match &err {
            sqlx::Error::Database(db_err)
                if db_err.is_unique_violation()
                    || db_err.message().contains("UNIQUE constraint failed") =>
            {
                StorageError::DuplicateId(id.to_string())
            }
            _ => StorageError::Database(err),
        }
    }

    pub fn is_duplicate(&self) -> bool {
        matches!(self, StorageError::DuplicateId(_))
    }
}
