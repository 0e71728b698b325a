use agdata_types::{RecordId, TypeError};
use rusqlite::ErrorCode;

/// Errors from record store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// `update` targeted an id with no stored record.
    #[error("record does not exist: {0}")]
    NotFound(RecordId),

    /// A storage constraint (the unique name index, `NOT NULL`) rejected a write.
    #[error("{0}")]
    ConstraintViolation(String),

    /// The record failed validation before reaching storage.
    #[error("invalid record: {0}")]
    Invalid(#[from] TypeError),

    /// The database could not be opened or is otherwise unreachable.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// Any other failure reported by the database driver.
    #[error("database error: {0}")]
    Database(String),

    /// The store configuration is unusable.
    #[error("invalid store configuration: {0}")]
    InvalidConfig(String),

    /// I/O error while preparing the storage location.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// Classify a driver error raised while performing `context`.
    pub(crate) fn from_sqlite(context: &str, err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(failure, _) => match failure.code {
                ErrorCode::ConstraintViolation => {
                    Self::ConstraintViolation(format!("{context}: {err}"))
                }
                ErrorCode::CannotOpen
                | ErrorCode::NotADatabase
                | ErrorCode::PermissionDenied
                | ErrorCode::ReadOnly
                | ErrorCode::DatabaseBusy
                | ErrorCode::DatabaseLocked => Self::Unavailable(format!("{context}: {err}")),
                _ => Self::Database(format!("{context}: {err}")),
            },
            _ => Self::Database(format!("{context}: {err}")),
        }
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
