//! Error types for the Earnings Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading earning rules or
//! computing earnings.

use thiserror::Error;

/// The main error type for the Earnings Engine.
///
/// Lookup helpers never return this type; an unknown program, airline or
/// fare class is reported there as `None` or an empty collection.
///
/// # Example
///
/// ```
/// use earnings_engine::error::EngineError;
///
/// let error = EngineError::InvalidInput {
///     field: "distance".to_string(),
///     message: "must not be negative".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid input 'distance': must not be negative");
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

    /// A rule in the loaded configuration is inconsistent.
    #[error("Invalid rule {program}/{airline}/{fare_class}: {message}")]
    InvalidRule {
        /// The program the rule belongs to.
        program: String,
        /// The airline the rule belongs to.
        airline: String,
        /// The fare class code, or `*` for airline-level problems.
        fare_class: String,
        /// A description of the inconsistency.
        message: String,
    },

    /// A calculation input was invalid.
    #[error("Invalid input '{field}': {message}")]
    InvalidInput {
        /// The input field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

impl EngineError {
    pub(crate) fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
