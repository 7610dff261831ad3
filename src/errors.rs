/*!
 * Error types for the ezchajim application.
 *
 * Only parameter misuse is a hard failure inside the pipeline. Unknown
 * characters, rules that never match and failed translation checks are all
 * represented as data, so they have no variant here.
 */

use thiserror::Error;

/// Errors raised by the processing core
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProcessingError {
    /// A caller supplied a parameter outside its defined range
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Name of the offending parameter
        name: String,
        /// Why the value was rejected
        reason: String,
    },

    /// A terminology rule could not be compiled
    #[error("Invalid terminology rule: {0}")]
    InvalidRule(String),
}

impl ProcessingError {
    /// Shorthand for an `InvalidParameter` error
    pub fn invalid_parameter(name: &str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from the processing core
    #[error("Processing error: {0}")]
    Processing(#[from] ProcessingError),

    /// Error reading or writing JSON documents
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Error in the configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization(error.to_string())
    }
}
