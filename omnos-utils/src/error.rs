//! Error types for the omnos utilities.

use thiserror::Error;

/// Top-level error type for the fallible omnos helpers.
#[derive(Error, Debug)]
pub enum UtilError {
    /// A merge input was not of the kind the first input dictates.
    #[error("Type mismatch: merge input {index} is {found}, expected {expected}")]
    TypeMismatch {
        /// Position of the offending input.
        index: usize,
        /// Kind required at that position.
        expected: &'static str,
        /// Kind actually supplied.
        found: &'static str,
    },

    /// A value could not be canonically serialized.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for UtilError {
    fn from(err: serde_json::Error) -> Self {
        UtilError::Serialization(err.to_string())
    }
}

/// Convenience Result type alias.
pub type Result<T> = std::result::Result<T, UtilError>;
