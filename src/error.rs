//! Error types for the convergence evaluator.
//!
//! This module provides a unified error type [`ConvergenceError`] that covers
//! malformed solver input, configuration loading, and the helper utilities.
//!
//! A Newton iterate that has not converged is *not* an error: it is reported
//! as `false` in a [`ConvergenceVerdict`](crate::convergence::ConvergenceVerdict).

use thiserror::Error;

/// Result type alias using [`ConvergenceError`].
pub type Result<T> = std::result::Result<T, ConvergenceError>;

/// Unified error type for all convergence operations.
#[derive(Error, Debug)]
pub enum ConvergenceError {
    // ============ Evaluation Errors ============
    /// Input vectors do not have matching lengths
    #[error("Dimension mismatch: {what} has length {found}, expected {expected}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    /// Partition index lies outside the solution vector
    #[error("Partition index {index} is out of range for {len} unknowns")]
    PartitionOutOfRange { index: usize, len: usize },

    // ============ Configuration Errors ============
    /// Tolerance is negative or not finite
    #[error("Invalid tolerance '{name}': {value:e} (must be finite and non-negative)")]
    InvalidTolerance { name: &'static str, value: f64 },

    /// Unknown key in an options deck
    #[error("Unknown option '{name}' at line {line}")]
    UnknownOption { name: String, line: usize },

    /// Malformed options line
    #[error("Option syntax error at line {line}, column {column}: {message}")]
    OptionSyntax {
        line: usize,
        column: usize,
        message: String,
    },

    /// Value that does not parse as a number
    #[error("Invalid numeric value '{text}' at line {line}")]
    InvalidValue { line: usize, text: String },

    // ============ Helper Errors ============
    /// Combination size not compatible with the source set
    #[error("Cannot take {k}-combinations of a set of {set_len} elements")]
    InvalidCombination { set_len: usize, k: usize },

    /// Row or column index outside a matrix
    #[error("{axis} index {index} is out of range (size {len})")]
    IndexOutOfRange {
        index: usize,
        len: usize,
        axis: &'static str,
    },

    /// Sweep parameters that cannot generate any points
    #[error("Invalid sweep: {message}")]
    InvalidSweep { message: String },

    // ============ I/O Errors ============
    /// Path does not exist
    #[error("'{path}' not found")]
    FileNotFound { path: String },

    /// Path exists but is not a regular file
    #[error("'{path}' is not a file")]
    NotAFile { path: String },

    /// Error reading an input file
    #[error("Failed to read file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Malformed iterate table
    #[error("Input error at line {line}: {message}")]
    InputError { line: usize, message: String },
}

impl ConvergenceError {
    /// Create a dimension mismatch error
    pub fn dimension_mismatch(what: &'static str, expected: usize, found: usize) -> Self {
        Self::DimensionMismatch {
            what,
            expected,
            found,
        }
    }

    /// Create an option syntax error
    pub fn option_syntax(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::OptionSyntax {
            line,
            column,
            message: message.into(),
        }
    }

    /// Create an input error
    pub fn input(line: usize, message: impl Into<String>) -> Self {
        Self::InputError {
            line,
            message: message.into(),
        }
    }

    /// Create an invalid sweep error
    pub fn invalid_sweep(message: impl Into<String>) -> Self {
        Self::InvalidSweep {
            message: message.into(),
        }
    }
}
