//! Custom error types for PureNote
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

pub use crate::crypto::CryptoError;

/// The main error type for PureNote operations
#[derive(Error, Debug)]
pub enum PureNoteError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for input and data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// Login failed; never says which half of the credentials was wrong
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The entity exists but belongs to another user
    #[error("Access denied: {0}")]
    Forbidden(String),

    /// Content encryption errors
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl PureNoteError {
    /// Create a "not found" error for users
    pub fn user_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "User",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for diary entries
    pub fn entry_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Diary entry",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for tags
    pub fn tag_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Tag",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a wrong-password-or-tampered-data failure
    pub fn is_authentication_failure(&self) -> bool {
        matches!(self, Self::Crypto(CryptoError::AuthenticationFailure))
    }
}

impl From<std::io::Error> for PureNoteError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for PureNoteError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for PureNote operations
pub type PureNoteResult<T> = Result<T, PureNoteError>;
