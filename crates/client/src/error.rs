//! Client error types.

use thiserror::Error;
use usersync_core::remote::RemoteError;

/// Result type alias for client module.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur during client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Server returned {status}: {message}")]
    ServerError { status: u16, message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<ClientError> for RemoteError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Request(err) => RemoteError::Request(err.to_string()),
            ClientError::ServerError { status, message } => RemoteError::Status { status, message },
            ClientError::NotFound { resource } => RemoteError::Status {
                status: 404,
                message: format!("{resource} not found"),
            },
            ClientError::InvalidResponse(message) => RemoteError::InvalidResponse(message),
            ClientError::InvalidInput(message) => RemoteError::Request(message),
            ClientError::Json(err) => RemoteError::InvalidResponse(err.to_string()),
        }
    }
}
