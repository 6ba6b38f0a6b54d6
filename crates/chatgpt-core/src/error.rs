//! Error types for the chatgpt client.

use std::path::PathBuf;

use thiserror::Error;

use crate::models::RemoteError;

/// Result type alias using the client's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for every client operation.
#[derive(Error, Debug)]
pub enum Error {
    /// The API answered with an error status and a structured error body.
    #[error("OpenAI API error (HTTP {status}): {}", .error.message)]
    Api {
        status: u16,
        error: RemoteError,
        #[source]
        source: reqwest::Error,
    },

    /// Transport failure, or an error response whose body could not be read
    /// as a structured error. Carried unchanged.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Encoding a request or decoding a success body failed.
    #[error("Serialization error: {0}")]
    Codec(#[from] serde_json::Error),

    /// A local file needed for an upload could not be read.
    #[error("I/O error for {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// HTTP status attached to this error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// The structured remote error, when one was decoded.
    pub fn remote(&self) -> Option<&RemoteError> {
        match self {
            Error::Api { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Classification of the remote error, when one was decoded.
    pub fn remote_kind(&self) -> Option<RemoteErrorKind> {
        match self {
            Error::Api { status, error, .. } => Some(RemoteErrorKind::classify(*status, error)),
            _ => None,
        }
    }

    /// Wrap an I/O failure on a local file.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

/// Coarse classification of remote errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteErrorKind {
    /// Invalid authentication credentials.
    Authentication,
    /// Rate limit exceeded.
    RateLimit,
    /// Model not found or not available.
    ModelNotFound,
    /// Request too large for the model's context.
    ContextLengthExceeded,
    /// Server error.
    Server,
    /// Unknown error.
    Unknown,
}

impl RemoteErrorKind {
    /// Classify a decoded error body.
    ///
    /// The machine-readable `code` is consulted first, then `type`; the HTTP
    /// status only decides when neither label is recognised.
    pub fn classify(status: u16, error: &RemoteError) -> Self {
        error
            .code
            .as_deref()
            .into_iter()
            .chain(std::iter::once(error.error_type.as_str()))
            .find_map(Self::from_label)
            .unwrap_or_else(|| Self::from_status(status))
    }

    fn from_label(label: &str) -> Option<Self> {
        let kind = match label {
            "invalid_api_key" | "authentication_error" => Self::Authentication,
            "rate_limit_exceeded" | "rate_limit_error" => Self::RateLimit,
            "model_not_found" => Self::ModelNotFound,
            "context_length_exceeded" => Self::ContextLengthExceeded,
            "server_error" => Self::Server,
            _ => return None,
        };
        Some(kind)
    }

    fn from_status(status: u16) -> Self {
        match status {
            401 => Self::Authentication,
            404 => Self::ModelNotFound,
            429 => Self::RateLimit,
            500..=599 => Self::Server,
            _ => Self::Unknown,
        }
    }

    /// Whether a caller-side retry is reasonable. The client never retries.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimit | Self::Server)
    }
}
