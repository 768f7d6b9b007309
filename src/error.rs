//! Error handling for the Triagely client

use std::fmt;
use thiserror::Error;

/// Unified error type for the Triagely client
#[derive(Error, Debug)]
pub enum Error {
    /// Network or HTTP related errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization or deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Authentication failures (wrong credentials)
    #[error("Authentication error: {0}")]
    Auth(String),

    /// The server rejected the bearer token (HTTP 401)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The requested resource does not exist (HTTP 404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Any other non-success response from the API
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Session storage I/O errors
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// General errors
    #[error("{0}")]
    General(String),
}

impl Error {
    /// Create a new authentication error
    pub fn auth<T: fmt::Display>(msg: T) -> Self {
        Error::Auth(msg.to_string())
    }

    /// Create a new general error
    pub fn general<T: fmt::Display>(msg: T) -> Self {
        Error::General(msg.to_string())
    }

    /// Whether this error is a rejected bearer token (HTTP 401)
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Error::Unauthorized(_))
    }

    /// Whether this error is a missing resource (HTTP 404)
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }
}
