//! Unified application error types for DocRoom.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// The share token did not resolve to a link record.
    LinkNotFound,
    /// The link was revoked by its owner.
    LinkRevoked,
    /// The link has passed its expiry time or was marked expired.
    LinkExpired,
    /// The link has reached its maximum view count.
    MaxViewsExceeded,
    /// The supplied share password was incorrect.
    PasswordIncorrect,
    /// The required NDA has not been signed yet.
    NdaNotSigned,
    /// The shared bundle or folder contains no documents.
    ContentEmpty,
    /// No document in the requested set could be resolved to a URL.
    ContentUnavailable,
    /// A viewer session is missing, unknown, or expired.
    Session,
    /// Input validation failed.
    Validation,
    /// A configuration error occurred.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
    /// The managed backend returned an error or was unreachable.
    Backend,
    /// An internal server error occurred.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LinkNotFound => write!(f, "LINK_NOT_FOUND"),
            Self::LinkRevoked => write!(f, "LINK_REVOKED"),
            Self::LinkExpired => write!(f, "LINK_EXPIRED"),
            Self::MaxViewsExceeded => write!(f, "MAX_VIEWS_EXCEEDED"),
            Self::PasswordIncorrect => write!(f, "PASSWORD_INCORRECT"),
            Self::NdaNotSigned => write!(f, "NDA_NOT_SIGNED"),
            Self::ContentEmpty => write!(f, "CONTENT_EMPTY"),
            Self::ContentUnavailable => write!(f, "CONTENT_UNAVAILABLE"),
            Self::Session => write!(f, "SESSION"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Serialization => write!(f, "SERIALIZATION"),
            Self::Backend => write!(f, "BACKEND"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// The unified application error used throughout DocRoom.
///
/// All crate-specific errors are mapped into `AppError` using `From` impls
/// or explicit `.map_err()` calls. This provides a single error type for
/// the entire application boundary.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
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
            source: Some(Box::new(source)),
        }
    }

    /// Create a link-not-found error.
    pub fn link_not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::LinkNotFound, message)
    }

    /// Create a link-revoked error.
    pub fn link_revoked(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::LinkRevoked, message)
    }

    /// Create a link-expired error.
    pub fn link_expired(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::LinkExpired, message)
    }

    /// Create a max-views-exceeded error.
    pub fn max_views_exceeded(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MaxViewsExceeded, message)
    }

    /// Create a password-incorrect error.
    pub fn password_incorrect(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::PasswordIncorrect, message)
    }

    /// Create an NDA-not-signed error.
    pub fn nda_not_signed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NdaNotSigned, message)
    }

    /// Create a content-empty error.
    pub fn content_empty(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ContentEmpty, message)
    }

    /// Create a content-unavailable error.
    pub fn content_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ContentUnavailable, message)
    }

    /// Create a session error.
    pub fn session(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Session, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create a backend error.
    pub fn backend(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Backend, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
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
        Self::with_source(ErrorKind::Internal, format!("I/O error: {err}"), err)
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
