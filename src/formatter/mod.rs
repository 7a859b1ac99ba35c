//! Response body formatters.
//!
//! This module provides the three output shapes for a violation list. All
//! of them implement [`Formatter`] and consume the same [`ViolationList`]
//! input.
//!
//! | name      | type                        | shape                                  |
//! |-----------|-----------------------------|----------------------------------------|
//! | `simple`  | [`FlatFormatter`]           | `{errors: {"a.b": [..]}}`              |
//! | `nested`  | [`NestedFormatter`]         | `{errors: {a: {b: [..]}}}`             |
//! | `rfc7807` | [`ProblemDetailsFormatter`] | `{type, title, status, detail, violations}` |
//!
//! [`ViolationList`]: crate::ViolationList

mod flat;
mod nested;
mod problem_details;
mod traits;

use std::fmt::{self, Display};
use std::str::FromStr;

pub use flat::FlatFormatter;
pub use nested::NestedFormatter;
pub use problem_details::{
    ProblemDetails, ProblemDetailsFormatter, ProblemViolation, DEFAULT_PROBLEM_TITLE,
    DEFAULT_PROBLEM_TYPE, PROBLEM_STATUS,
};
pub use traits::Formatter;

use crate::config::ConfigError;

/// Legacy spelling of [`FormatKind::Nested`].
const LEGACY_NESTED_NAME: &str = "simple-nested";

/// Names the built-in output shapes.
///
/// # Example
///
/// ```rust
/// use violation_response::FormatKind;
///
/// assert_eq!("rfc7807".parse::<FormatKind>().unwrap(), FormatKind::ProblemDetails);
/// assert_eq!(FormatKind::Nested.as_str(), "nested");
/// assert!("xml".parse::<FormatKind>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FormatKind {
    /// [`FlatFormatter`].
    #[default]
    Simple,
    /// [`NestedFormatter`].
    Nested,
    /// [`ProblemDetailsFormatter`].
    ProblemDetails,
}

impl FormatKind {
    /// All built-in kinds.
    pub const ALL: [FormatKind; 3] = [
        FormatKind::Simple,
        FormatKind::Nested,
        FormatKind::ProblemDetails,
    ];

    /// Returns the canonical configuration name.
    pub fn as_str(&self) -> &'static str {
        match self {
            FormatKind::Simple => "simple",
            FormatKind::Nested => "nested",
            FormatKind::ProblemDetails => "rfc7807",
        }
    }
}

impl Display for FormatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormatKind {
    type Err = ConfigError;

    /// Parses a canonical name. `simple-nested` is still accepted for
    /// [`FormatKind::Nested`] but logs a deprecation warning.
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        if name == LEGACY_NESTED_NAME {
            tracing::warn!(
                format = name,
                "format name is deprecated, use \"nested\" instead"
            );
            return Ok(FormatKind::Nested);
        }

        FormatKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == name)
            .ok_or_else(|| ConfigError::InvalidFormat(name.to_string()))
    }
}
