//! The formatter trait.
//!
//! This module provides the [`Formatter`] trait shared by every output shape.

use serde_json::Value;

use crate::error::ViolationList;

/// Turns a violation list into a JSON response body.
///
/// Implementations walk the list once, in order, and never fail: an empty
/// list yields a well-formed document with empty content. The `Send + Sync`
/// bounds let a formatter be shared across threads as `Arc<dyn Formatter>`.
///
/// # Example
///
/// ```rust
/// use violation_response::{Formatter, NestedFormatter, Violation, ViolationList};
/// use serde_json::json;
///
/// let formatters: Vec<Box<dyn Formatter>> = vec![Box::new(NestedFormatter::new())];
/// let violations = ViolationList::single(Violation::new("address.city", "Invalid city"));
///
/// assert_eq!(
///     formatters[0].format(&violations),
///     json!({"errors": {"address": {"city": ["Invalid city"]}}})
/// );
/// ```
pub trait Formatter: Send + Sync {
    /// Formats the violations into a response body.
    fn format(&self, violations: &ViolationList) -> Value;
}

impl<F: Formatter + ?Sized> Formatter for Box<F> {
    fn format(&self, violations: &ViolationList) -> Value {
        (**self).format(violations)
    }
}

impl<F: Formatter + ?Sized> Formatter for std::sync::Arc<F> {
    fn format(&self, violations: &ViolationList) -> Value {
        (**self).format(violations)
    }
}
