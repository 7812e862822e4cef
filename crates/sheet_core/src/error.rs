//! Core error types

use thiserror::Error;

/// Errors produced by core primitives
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Color string was not a recognized hex form
    #[error("Invalid color '{input}': {reason}")]
    InvalidColor {
        /// The rejected input
        input: String,
        /// What was wrong with it
        reason: &'static str,
    },
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
