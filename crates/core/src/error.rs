//! Core Error Types
//!
//! Defines the error taxonomy shared by every component of the interview
//! engine. These error types are dependency-free (only thiserror + std) to keep
//! the core crate lightweight.
//!
//! The application crate wraps these in `AppError` together with the
//! configuration and I/O variants that need heavier dependencies.

use thiserror::Error;

/// Core error type for the interview engine.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Missing caller identity; raised before any collaborator is contacted
    #[error("Not authenticated: {0}")]
    NotAuthenticated(String),

    /// A collaborator (AI generator, submission store, ledger, cache) failed
    #[error("{service} unavailable: {message}")]
    UpstreamUnavailable { service: String, message: String },

    /// A required record does not exist
    #[error("Data missing: {0}")]
    DataMissing(String),

    /// Malformed numbers or states rejected at construction
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// Invalid caller input
    #[error("Validation error: {0}")]
    Validation(String),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for core errors
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Create a not-authenticated error
    pub fn not_authenticated(msg: impl Into<String>) -> Self {
        Self::NotAuthenticated(msg.into())
    }

    /// Create an upstream error for the named collaborator
    pub fn upstream(service: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::UpstreamUnavailable {
            service: service.into(),
            message: msg.into(),
        }
    }

    /// Create a data-missing error
    pub fn data_missing(msg: impl Into<String>) -> Self {
        Self::DataMissing(msg.into())
    }

    /// Create an invariant violation
    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Whether a caller may fall back to cached data instead of surfacing
    /// this error.
    ///
    /// Only collaborator outages and missing records qualify; identity and
    /// invariant failures must always reach the caller.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            CoreError::UpstreamUnavailable { .. } | CoreError::DataMissing(_)
        )
    }
}
