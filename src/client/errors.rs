//! Client errors

use thiserror::Error;

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Client-side failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// Network or connection failure. The action is abandoned, never retried.
    #[error("Request failed: {0}")]
    Transport(String),

    /// User input rejected before any request was sent
    #[error("{0}")]
    InvalidInput(String),

    /// Terminal read/write failure
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        ClientError::Transport(e.to_string())
    }
}

impl From<std::io::Error> for ClientError {
    fn from(e: std::io::Error) -> Self {
        ClientError::Io(e.to_string())
    }
}
