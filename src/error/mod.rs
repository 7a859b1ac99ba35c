//! Violation types and input errors.
//!
//! This module provides the types that describe validation failures handed
//! to formatters, along with the error raised when violations arrive as
//! malformed JSON.

mod violation;

pub use violation::{Violation, ViolationList};

/// Errors that can occur while decoding a violation list from JSON.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    /// The input was not valid JSON.
    #[error("failed to deserialize violations: {0}")]
    Deserialize(#[from] serde_json::Error),

    /// The top-level JSON value was not an array.
    #[error("violations must be a JSON array")]
    NotAnArray,

    /// An array entry did not have the violation shape.
    #[error("invalid violation at index {index}: {reason}")]
    InvalidEntry {
        /// Position of the offending entry.
        index: usize,
        /// What was wrong with it.
        reason: String,
    },
}
