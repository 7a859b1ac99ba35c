//! Response configuration.
//!
//! This module provides [`ResponseConfig`], the settings that choose a
//! formatter and the HTTP status used for validation failures, together
//! with [`ConfigError`] and the accumulating [`ConfigErrors`].
//!
//! Configuration can be built in code or read from a JSON document shaped
//! like:
//!
//! ```json
//! {
//!   "status_code": 422,
//!   "format": "rfc7807",
//!   "rfc7807": { "type": "about:blank", "title": "Validation Failed" }
//! }
//! ```
//!
//! Every key is optional. Reading never stops at the first problem: all
//! invalid keys are reported together.

use std::fmt::{self, Display};
use std::ops::RangeInclusive;
use std::sync::Arc;

use serde_json::Value;
use stillwater::prelude::*;
use stillwater::Validation;

use crate::formatter::{
    FlatFormatter, FormatKind, Formatter, NestedFormatter, ProblemDetailsFormatter,
    DEFAULT_PROBLEM_TITLE, DEFAULT_PROBLEM_TYPE,
};

/// Status code used when none is configured.
pub const DEFAULT_STATUS_CODE: u16 = 422;

/// Allowed status codes.
pub const STATUS_CODE_RANGE: RangeInclusive<u16> = 400..=599;

/// Name of the configuration root, used when the root itself is invalid.
const CONFIG_ROOT: &str = "validation_response";

/// Settings for the problem details formatter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemDetailsConfig {
    /// URI reference that identifies the problem type.
    pub problem_type: String,
    /// Short, human-readable summary of the problem.
    pub title: String,
}

impl Default for ProblemDetailsConfig {
    fn default() -> Self {
        Self {
            problem_type: DEFAULT_PROBLEM_TYPE.to_string(),
            title: DEFAULT_PROBLEM_TITLE.to_string(),
        }
    }
}

/// Selects the formatter and status code for validation failure responses.
///
/// # Example
///
/// ```rust
/// use violation_response::{FormatKind, ResponseConfig};
/// use serde_json::json;
///
/// let config = ResponseConfig::from_value(&json!({
///     "status_code": 400,
///     "format": "nested"
/// }));
///
/// match config {
///     stillwater::Validation::Success(config) => {
///         assert_eq!(config.status_code, 400);
///         assert_eq!(config.format, FormatKind::Nested);
///     }
///     stillwater::Validation::Failure(errors) => panic!("{}", errors),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseConfig {
    /// HTTP status code for validation failures, within [`STATUS_CODE_RANGE`].
    pub status_code: u16,
    /// Which formatter produces the body.
    pub format: FormatKind,
    /// Settings used when `format` is [`FormatKind::ProblemDetails`].
    pub problem_details: ProblemDetailsConfig,
}

impl Default for ResponseConfig {
    fn default() -> Self {
        Self {
            status_code: DEFAULT_STATUS_CODE,
            format: FormatKind::default(),
            problem_details: ProblemDetailsConfig::default(),
        }
    }
}

impl ResponseConfig {
    /// Creates the default configuration: status 422, `simple` format.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the status code and returns self for chaining.
    pub fn with_status_code(mut self, status_code: u16) -> Self {
        self.status_code = status_code;
        self
    }

    /// Sets the format and returns self for chaining.
    pub fn with_format(mut self, format: FormatKind) -> Self {
        self.format = format;
        self
    }

    /// Sets the problem `type` URI and returns self for chaining.
    pub fn with_problem_type(mut self, problem_type: impl Into<String>) -> Self {
        self.problem_details.problem_type = problem_type.into();
        self
    }

    /// Sets the problem `title` and returns self for chaining.
    pub fn with_problem_title(mut self, title: impl Into<String>) -> Self {
        self.problem_details.title = title.into();
        self
    }

    /// Checks values that the builder methods cannot constrain.
    pub fn validate(self) -> Validation<Self, ConfigErrors> {
        if STATUS_CODE_RANGE.contains(&self.status_code) {
            Validation::Success(self)
        } else {
            Validation::Failure(ConfigErrors::single(ConfigError::StatusCodeOutOfRange(
                i64::from(self.status_code),
            )))
        }
    }

    /// Reads a configuration from a JSON value.
    ///
    /// Missing keys keep their defaults. All problems are accumulated:
    /// unknown keys, values of the wrong type, a status code outside
    /// 400..=599 and unknown format names.
    pub fn from_value(value: &Value) -> Validation<Self, ConfigErrors> {
        let Some(object) = value.as_object() else {
            return Validation::Failure(ConfigErrors::single(ConfigError::InvalidType {
                key: CONFIG_ROOT.to_string(),
                expected: "an object",
            }));
        };

        let mut config = Self::default();
        let mut errors = Vec::new();

        for (key, entry) in object {
            match key.as_str() {
                "status_code" => match entry.as_i64() {
                    Some(code) => match u16::try_from(code)
                        .ok()
                        .filter(|code| STATUS_CODE_RANGE.contains(code))
                    {
                        Some(code) => config.status_code = code,
                        None => errors.push(ConfigError::StatusCodeOutOfRange(code)),
                    },
                    None => errors.push(ConfigError::invalid_type("status_code", "an integer")),
                },
                "format" => match entry.as_str() {
                    Some(name) => match name.parse::<FormatKind>() {
                        Ok(format) => config.format = format,
                        Err(error) => errors.push(error),
                    },
                    None => errors.push(ConfigError::invalid_type("format", "a string")),
                },
                "rfc7807" => {
                    read_problem_details(entry, &mut config.problem_details, &mut errors)
                }
                other => errors.push(ConfigError::UnknownKey(other.to_string())),
            }
        }

        match ConfigErrors::from_vec(errors) {
            Some(errors) => Validation::Failure(errors),
            None => {
                tracing::debug!(
                    status_code = config.status_code,
                    format = %config.format,
                    "loaded validation response config"
                );
                Validation::Success(config)
            }
        }
    }

    /// Builds the problem details formatter from these settings.
    pub fn problem_details_formatter(&self) -> ProblemDetailsFormatter {
        ProblemDetailsFormatter::new()
            .with_type(self.problem_details.problem_type.as_str())
            .with_title(self.problem_details.title.as_str())
    }

    /// Builds the built-in formatter for `kind` from these settings.
    pub fn formatter_for(&self, kind: FormatKind) -> Arc<dyn Formatter> {
        match kind {
            FormatKind::Simple => Arc::new(FlatFormatter::new()),
            FormatKind::Nested => Arc::new(NestedFormatter::new()),
            FormatKind::ProblemDetails => Arc::new(self.problem_details_formatter()),
        }
    }
}

fn read_problem_details(
    value: &Value,
    settings: &mut ProblemDetailsConfig,
    errors: &mut Vec<ConfigError>,
) {
    let Some(object) = value.as_object() else {
        errors.push(ConfigError::invalid_type("rfc7807", "an object"));
        return;
    };

    for (key, entry) in object {
        let target = match key.as_str() {
            "type" => &mut settings.problem_type,
            "title" => &mut settings.title,
            other => {
                errors.push(ConfigError::UnknownKey(format!("rfc7807.{}", other)));
                continue;
            }
        };

        match entry.as_str() {
            Some(text) => *target = text.to_string(),
            None => errors.push(ConfigError::InvalidType {
                key: format!("rfc7807.{}", key),
                expected: "a string",
            }),
        }
    }
}

/// A single configuration problem.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The status code is outside 400..=599.
    #[error("invalid status code {0}: must be between 400 and 599")]
    StatusCodeOutOfRange(i64),

    /// The format name is not one of the built-in formats.
    #[error("invalid format \"{0}\": must be one of \"simple\", \"nested\" or \"rfc7807\"")]
    InvalidFormat(String),

    /// A key holds a value of the wrong JSON type.
    #[error("`{key}` must be {expected}")]
    InvalidType {
        /// Dotted key of the offending value.
        key: String,
        /// Description of the expected type.
        expected: &'static str,
    },

    /// A key that is not part of the configuration.
    #[error("unrecognized option `{0}`")]
    UnknownKey(String),
}

impl ConfigError {
    fn invalid_type(key: &str, expected: &'static str) -> Self {
        ConfigError::InvalidType {
            key: key.to_string(),
            expected,
        }
    }
}

/// A non-empty collection of configuration problems.
///
/// `ConfigErrors` implements `Semigroup`, so problems found in separate
/// configuration sources can be combined.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigErrors(NonEmptyVec<ConfigError>);

impl ConfigErrors {
    /// Creates a collection holding a single problem.
    pub fn single(error: ConfigError) -> Self {
        Self(NonEmptyVec::singleton(error))
    }

    /// Creates a collection from a vec, or `None` if the vec is empty.
    pub fn from_vec(errors: Vec<ConfigError>) -> Option<Self> {
        NonEmptyVec::from_vec(errors).map(Self)
    }

    /// Returns the number of problems.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; the collection is never empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns an iterator over the problems.
    pub fn iter(&self) -> impl Iterator<Item = &ConfigError> {
        self.0.iter()
    }

    /// Returns the first problem.
    pub fn first(&self) -> &ConfigError {
        self.0.head()
    }

    /// Converts this collection into a `Vec<ConfigError>`.
    pub fn into_vec(self) -> Vec<ConfigError> {
        self.0.into_vec()
    }
}

impl Semigroup for ConfigErrors {
    fn combine(self, other: Self) -> Self {
        ConfigErrors(self.0.combine(other.0))
    }
}

impl Display for ConfigErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Invalid configuration with {} error(s):", self.len())?;
        for (i, error) in self.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ConfigErrors {}
