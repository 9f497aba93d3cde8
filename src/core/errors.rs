//! Core error types for target generation.
//!
//! This module defines the fundamental error types used throughout the crate.
//! Every malformed input is a precondition violation: the current call fails
//! immediately with no partial output, and no repair is attempted.

use thiserror::Error;

/// Convenient result alias used throughout the crate.
pub type TargetResult<T> = Result<T, TargetError>;

/// Errors that can occur while generating training targets.
#[derive(Debug, Error)]
pub enum TargetError {
    /// The input violates a precondition (bad polygon, bad dimensions, ...).
    #[error("invalid input: {message}")]
    InvalidInput {
        /// A message describing the invalid input.
        message: String,
    },

    /// A configuration value is out of its valid range.
    #[error("configuration: {message}")]
    Config {
        /// A message describing the configuration error.
        message: String,
    },

    /// Two buffers that must share a shape do not.
    #[error("shape mismatch: expected {expected:?}, got {actual:?} in {context}")]
    ShapeMismatch {
        /// The expected shape.
        expected: Vec<usize>,
        /// The actual shape.
        actual: Vec<usize>,
        /// Where the mismatch was detected.
        context: String,
    },
}

impl TargetError {
    /// Creates an [`TargetError::InvalidInput`] from anything stringifiable.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Creates an invalid-input error for a malformed polygon annotation.
    ///
    /// `index` is the position of the polygon in the caller's list, so the
    /// offending annotation can be located without re-running validation.
    pub fn invalid_polygon(index: usize, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: format!("polygon[{}]: {}", index, reason.into()),
        }
    }

    /// Creates a configuration error with context and details.
    pub fn config_error_detailed(context: impl Into<String>, details: impl Into<String>) -> Self {
        Self::Config {
            message: format!("{}: {}", context.into(), details.into()),
        }
    }

    /// Creates a shape-mismatch error.
    pub fn shape_mismatch(
        expected: impl Into<Vec<usize>>,
        actual: impl Into<Vec<usize>>,
        context: impl Into<String>,
    ) -> Self {
        Self::ShapeMismatch {
            expected: expected.into(),
            actual: actual.into(),
            context: context.into(),
        }
    }
}
