//! Error types for the VectorGo client.
//!
//! This module defines a unified error enum that covers all error categories
//! in the client: authentication, plain API calls, streaming uploads, and
//! configuration.

use thiserror::Error;

/// Unified error type for the VectorGo client.
///
/// All fallible functions in the workspace return `Result<T, AppError>`.
/// We never panic — errors must be represented and propagated. Every
/// variant carries a message suitable for direct display to the user.
#[derive(Error, Debug)]
pub enum AppError {
    /// Login rejected by the server (non-2xx on `/login`)
    #[error("login failed ({status}): {message}")]
    Auth { status: u16, message: String },

    /// Non-2xx response on any plain API request
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Upload failed: explicit error event from the server, a protocol
    /// violation, or a transport failure while the stream was open
    #[error("upload failed: {0}")]
    Upload(String),

    /// Upload aborted cooperatively. Kept separate from `Upload` so
    /// callers can report it without treating it as a failure.
    #[error("upload cancelled")]
    UploadCancelled,

    /// Transport-level HTTP errors (connection refused, DNS, TLS)
    #[error("HTTP error: {0}")]
    Http(String),

    /// Configuration-related errors
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
