//! Error types for kafkacli-core

use thiserror::Error;

/// Result type alias for kafkacli-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in kafkacli-core
#[derive(Error, Debug)]
pub enum Error {
    /// A caller-supplied argument was rejected before any network call
    #[error("{message}")]
    Validation {
        /// Description of what's invalid
        message: String,
    },

    /// The remote service answered with an error status.
    ///
    /// The display text is the raw response body, as sent by the server.
    #[error("{body}")]
    Http {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// The request could not be sent or the response could not be read
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a body that doesn't match the expected shape
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        /// Request URL
        url: String,
        /// Underlying JSON error
        source: serde_json::Error,
    },

    /// Invalid connector name pattern
    #[error("invalid connector pattern '{pattern}': {source}")]
    Pattern {
        /// The pattern that failed
        pattern: String,
        /// Underlying regex error
        source: regex::Error,
    },

    /// Connector configuration input could not be read or parsed
    #[error("invalid configuration from {origin}: {message}")]
    ConfigSource {
        /// Where the configuration came from (inline, file path)
        origin: String,
        /// Description of the error
        message: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Build a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation {
            message: message.into(),
        }
    }

    /// HTTP status of the failed call, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
