//! Flat per-path formatter.

use indexmap::IndexMap;
use serde_json::{json, Map, Value};

use super::Formatter;
use crate::error::ViolationList;

/// Groups messages by their raw, unparsed property path.
///
/// Paths are not split: `address.city` and `address.zip` stay unrelated
/// top-level keys, and root violations are grouped under the empty key.
///
/// ```json
/// { "errors": { "name": ["This value should not be blank."] } }
/// ```
///
/// # Example
///
/// ```rust
/// use violation_response::{FlatFormatter, Formatter, Violation, ViolationList};
/// use serde_json::json;
///
/// let violations: ViolationList = vec![
///     Violation::new("address.city", "Invalid city"),
///     Violation::new("address.city", "Too long"),
///     Violation::new("", "Invalid address"),
/// ]
/// .into();
///
/// assert_eq!(
///     FlatFormatter::new().format(&violations),
///     json!({"errors": {"address.city": ["Invalid city", "Too long"], "": ["Invalid address"]}})
/// );
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatFormatter;

impl FlatFormatter {
    /// Creates a new flat formatter.
    pub fn new() -> Self {
        Self
    }

    /// Groups messages by raw path, keeping first-seen path order.
    pub fn group(&self, violations: &ViolationList) -> IndexMap<String, Vec<String>> {
        let mut errors: IndexMap<String, Vec<String>> = IndexMap::new();
        for violation in violations {
            errors
                .entry(violation.path.clone())
                .or_default()
                .push(violation.message.clone());
        }
        errors
    }
}

impl Formatter for FlatFormatter {
    fn format(&self, violations: &ViolationList) -> Value {
        let errors: Map<String, Value> = self
            .group(violations)
            .into_iter()
            .map(|(path, messages)| (path, Value::from(messages)))
            .collect();
        json!({ "errors": errors })
    }
}
