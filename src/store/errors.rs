//! # Record Store Errors

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Record store errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    // Lookup errors
    #[error("Object not found")]
    NotFound(i64),

    // Client errors
    #[error("Missing required field: {0}")]
    Validation(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("Export is not supported by the {0} backend")]
    ExportUnsupported(&'static str),

    // Backing resource errors
    #[error("Corrupt data file: {0}")]
    Corrupt(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl StoreError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            StoreError::NotFound(_) => 404,
            StoreError::Validation(_) => 400,
            StoreError::Constraint(_) => 400,
            StoreError::ExportUnsupported(_) => 404,
            StoreError::Corrupt(_) => 500,
            StoreError::Io(_) => 500,
            StoreError::Database(_) => 500,
        }
    }

    /// Whether the caller can fix the request and try again
    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e.to_string())
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        match e {
            rusqlite::Error::SqliteFailure(code, msg)
                if code.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                StoreError::Constraint(msg.unwrap_or_else(|| code.to_string()))
            }
            other => StoreError::Database(other.to_string()),
        }
    }
}
