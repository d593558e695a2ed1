//! Error types for the Quatro Cantos engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the calculations, the inventory reconciler and the
//! product stores can report.

use thiserror::Error;

/// The main error type for the Quatro Cantos engine.
///
/// All fallible operations in the engine return this error type. Outcomes
/// that are part of normal business flow (a product that does not exist, a
/// product with no stock left) are not errors; see
/// [`OutboundOutcome`](crate::inventory::OutboundOutcome).
///
/// # Example
///
/// ```
/// use quatro_cantos::error::EngineError;
///
/// let error = EngineError::Validation {
///     field: "name".to_string(),
///     message: "product name is required".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid 'name': product name is required");
/// ```
#[derive(Debug, Error)]
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

    /// An input was invalid or its result would not fit a `Decimal`.
    #[error("Invalid '{field}': {message}")]
    Validation {
        /// The input that was invalid.
        field: String,
        /// A description of what made the input invalid.
        message: String,
    },

    /// The product store failed to read or write.
    #[error("Storage error: {message}")]
    Storage {
        /// A description of the storage failure.
        message: String,
    },

    /// Hashing or verifying a password failed.
    #[error("Password hashing error: {message}")]
    PasswordHash {
        /// A description of the hashing failure.
        message: String,
    },
}

impl EngineError {
    /// Builds a [`EngineError::Validation`] for the given field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<rusqlite::Error> for EngineError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Storage {
            message: err.to_string(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
