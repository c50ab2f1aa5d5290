//! Error types for the Parlo client core.
//!
//! The taxonomy separates local precondition failures (rejected before
//! any remote call), authorization denials, remote/transport failures,
//! and not-found outcomes, so callers can present each one differently.

use serde::Serialize;
use thiserror::Error;

/// A shared error type for the entire client core.
///
/// This provides typed, structured error variants with automatic
/// conversion from common error types via the `From` trait.
#[derive(Error, Debug, Clone, Serialize)]
pub enum ParloError {
    /// A local precondition failed (invalid transition, empty required
    /// field, missing identity). Never the result of a remote call.
    #[error("{0}")]
    Precondition(String),

    /// The caller is not allowed to perform the action or view the
    /// content. Presented as a fixed access-denied outcome.
    #[error("Access denied")]
    AccessDenied,

    /// Entity not found with type information
    #[error("{entity_type} {id} not found")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Network or remote service failure. The operation did not commit
    /// and may be retried by the user.
    #[error("Remote call failed: {0}")]
    Remote(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ParloError {
    /// Creates a Precondition error with a user-actionable message
    pub fn precondition(message: impl Into<String>) -> Self {
        Self::Precondition(message.into())
    }

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }

    /// Creates a Remote error
    pub fn remote(message: impl Into<String>) -> Self {
        Self::Remote(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is a local precondition failure
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::Precondition(_))
    }

    /// Check if this is an authorization denial
    pub fn is_access_denied(&self) -> bool {
        matches!(self, Self::AccessDenied)
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a remote/transport failure
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote(_))
    }
}

impl From<serde_json::Error> for ParloError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

/// Conversion from anyhow::Error (boundary code only)
impl From<anyhow::Error> for ParloError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A type alias for `Result<T, ParloError>`.
pub type Result<T> = std::result::Result<T, ParloError>;
