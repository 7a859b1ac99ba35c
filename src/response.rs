//! Validation failure responses.
//!
//! This module provides [`ValidationResponder`], which pairs a formatter with
//! an HTTP status code, and [`ValidationResponse`], the transport-neutral
//! result it produces. Encoding the body and writing it to a connection are
//! left to the caller's web stack.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use stillwater::Validation;

use crate::config::{ConfigError, ConfigErrors, ResponseConfig, STATUS_CODE_RANGE};
use crate::error::ViolationList;
use crate::formatter::Formatter;
use crate::registry::{FormatterRegistry, RegistryError};

/// A formatted validation failure ready to be sent.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body.
    pub body: Value,
}

impl ValidationResponse {
    /// Encodes the body as compact JSON.
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.body)
    }

    /// Encodes the body as indented JSON.
    pub fn to_json_string_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.body)
    }
}

/// Turns violation lists into responses.
///
/// The responder status is independent of any status embedded in the body:
/// a problem details body always says 422 even when the responder is
/// configured with another code.
///
/// # Example
///
/// ```rust
/// use violation_response::{FormatKind, ResponseConfig, ValidationResponder, Violation, ViolationList};
/// use serde_json::json;
///
/// let config = ResponseConfig::new()
///     .with_status_code(400)
///     .with_format(FormatKind::Nested);
///
/// let responder = ValidationResponder::from_config(&config).unwrap();
///
/// let response = responder.respond(&ViolationList::single(Violation::new("name", "required")));
/// assert_eq!(response.status, 400);
/// assert_eq!(response.body, json!({"errors": {"name": ["required"]}}));
/// ```
#[derive(Clone)]
pub struct ValidationResponder {
    formatter: Arc<dyn Formatter>,
    status: u16,
}

impl ValidationResponder {
    /// Creates a responder sending `status` with the formatter's output.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::StatusCodeOutOfRange` if `status` is outside
    /// 400..=599.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::sync::Arc;
    /// use violation_response::{FlatFormatter, ValidationResponder};
    ///
    /// let responder = ValidationResponder::new(Arc::new(FlatFormatter::new()), 400).unwrap();
    /// assert_eq!(responder.status(), 400);
    ///
    /// assert!(ValidationResponder::new(Arc::new(FlatFormatter::new()), 200).is_err());
    /// ```
    pub fn new(formatter: Arc<dyn Formatter>, status: u16) -> Result<Self, ConfigError> {
        if !STATUS_CODE_RANGE.contains(&status) {
            return Err(ConfigError::StatusCodeOutOfRange(i64::from(status)));
        }

        Ok(Self { formatter, status })
    }

    /// Creates a responder whose formatter is looked up in `registry` under
    /// the configured format name.
    ///
    /// # Errors
    ///
    /// Returns `ResponderError::Config` with every configuration problem if
    /// `config` is invalid, and `ResponderError::Registry` if no formatter
    /// is registered for the configured format.
    pub fn from_registry(
        registry: &FormatterRegistry,
        config: &ResponseConfig,
    ) -> Result<Self, ResponderError> {
        let config = match config.clone().validate() {
            Validation::Success(config) => config,
            Validation::Failure(errors) => return Err(ResponderError::Config(errors)),
        };

        let name = config.format.as_str();
        let formatter = registry
            .get(name)
            .ok_or_else(|| RegistryError::FormatterNotFound(name.to_string()))?;

        tracing::debug!(format = %name, status = config.status_code, "resolved responder formatter");
        Self::new(formatter, config.status_code).map_err(|error| ConfigErrors::single(error).into())
    }

    /// Creates a responder from a configuration, resolving the formatter
    /// through a registry of the built-in formatters.
    ///
    /// # Errors
    ///
    /// See [`ValidationResponder::from_registry`].
    pub fn from_config(config: &ResponseConfig) -> Result<Self, ResponderError> {
        Self::from_registry(&FormatterRegistry::with_builtins(config), config)
    }

    /// Returns the status code responses are sent with.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Formats the violations into a response.
    pub fn respond(&self, violations: &ViolationList) -> ValidationResponse {
        tracing::debug!(
            violations = violations.len(),
            status = self.status,
            "formatting validation failure response"
        );

        ValidationResponse {
            status: self.status,
            body: self.formatter.format(violations),
        }
    }
}

impl fmt::Debug for ValidationResponder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationResponder")
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

/// Errors that can occur while building a [`ValidationResponder`].
#[derive(Debug, thiserror::Error)]
pub enum ResponderError {
    /// The configuration was invalid.
    #[error(transparent)]
    Config(#[from] ConfigErrors),

    /// The configured format had no registered formatter.
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ValidationResponder>();
    assert_sync::<ValidationResponder>();
};
