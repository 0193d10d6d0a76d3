use thiserror::Error;

/// A remote call that did not succeed.
///
/// Timeouts, connection errors and non-success statuses are all reported through this
/// type; callers treat every variant as the same recoverable failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RemoteError {
    #[error("Request failed: {0}")]
    Request(String),
    #[error("Remote returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Result type for remote operations.
pub type Result<T> = std::result::Result<T, RemoteError>;
