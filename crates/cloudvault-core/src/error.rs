//! Unified application error types for CloudVault.
//!
//! Every layer maps its failures into [`AppError`] so they propagate through
//! the `?` operator. Callers that talk to the API must look at
//! [`AppError::is_token_expired`] before deciding how to surface an error:
//! a token-expired error ends the session instead of being shown inline.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// The request never produced an HTTP response (DNS, connect, TLS, timeout).
    Transport,
    /// The server answered with something other than JSON, e.g. a proxy error page.
    InvalidResponse,
    /// The API answered with a JSON error body.
    Api,
    /// No authenticated session is available for an operation that needs one.
    Authentication,
    /// Input validation failed before any request was made.
    Validation,
    /// A resource was not found locally (unknown share or file id).
    NotFound,
    /// A configuration error occurred.
    Configuration,
    /// A local file I/O error occurred.
    Storage,
    /// A serialization/deserialization error occurred.
    Serialization,
    /// An internal error occurred.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport => write!(f, "TRANSPORT"),
            Self::InvalidResponse => write!(f, "INVALID_RESPONSE"),
            Self::Api => write!(f, "API"),
            Self::Authentication => write!(f, "AUTHENTICATION"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Storage => write!(f, "STORAGE"),
            Self::Serialization => write!(f, "SERIALIZATION"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// The unified application error used throughout CloudVault.
///
/// `Display` renders only the message, which is what views show to the
/// user. API errors carry the HTTP status they were decoded from.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// HTTP status of the response this error was decoded from, if any.
    pub status: Option<u16>,
    /// Whether the session token must be treated as expired.
    pub token_expired: bool,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            token_expired: false,
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            token_expired: false,
            source: Some(Box::new(source)),
        }
    }

    /// Attach the HTTP status the error was decoded from.
    #[must_use]
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Set the token-expired classification.
    #[must_use]
    pub fn with_token_expired(mut self, expired: bool) -> Self {
        self.token_expired = expired;
        self
    }

    /// Create an API error from a JSON error body.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Api, message).with_status(status)
    }

    /// Create an error for a non-JSON response.
    pub fn invalid_response(status: u16, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidResponse, message).with_status(status)
    }

    /// Create a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Transport, message)
    }

    /// Create an authentication error.
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authentication, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create a storage error.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Storage, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Whether this error must end the session rather than be shown inline.
    pub fn is_token_expired(&self) -> bool {
        self.token_expired
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            status: self.status,
            token_expired: self.token_expired,
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorKind::Storage, format!("I/O error: {err}"), err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_decode() {
            ErrorKind::Serialization
        } else if err.is_builder() {
            ErrorKind::Internal
        } else {
            ErrorKind::Transport
        };
        Self::with_source(kind, format!("Request failed: {err}"), err)
    }
}
