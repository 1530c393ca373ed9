//! Error types for the benefits allocation engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every contract violation the engine can reject. Over-allocation is
//! deliberately absent: it is reported on the normal
//! [`AllocationResult`](crate::models::AllocationResult) instead.

use thiserror::Error;

/// The main error type for the benefits allocation engine.
///
/// # Example
///
/// ```
/// use benefits_engine::error::EngineError;
///
/// let error = EngineError::NotFound {
///     entity: "employee".to_string(),
///     id: "42".to_string(),
/// };
/// assert_eq!(error.to_string(), "employee not found: 42");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A value supplied by the caller broke the input contract.
    #[error("Invalid input for '{field}': {message}")]
    InvalidInput {
        /// The field or argument that was rejected.
        field: String,
        /// A description of what made the value invalid.
        message: String,
    },

    /// An operation referenced an entity that does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The kind of entity (e.g. "client", "employee").
        entity: String,
        /// The identifier that was looked up.
        id: String,
    },
}

impl EngineError {
    /// Shorthand for an [`EngineError::InvalidInput`].
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Shorthand for an [`EngineError::NotFound`].
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
