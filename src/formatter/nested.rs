//! Nested tree formatter.

use serde_json::{json, Value};

use super::Formatter;
use crate::error::ViolationList;
use crate::tree::{ErrorNode, TreeBuilder};

/// Builds an object mirroring the structure of the property paths.
///
/// Each path is parsed into segments and folded into an [`ErrorNode`] tree.
/// A path that is both an error target and the parent of deeper errors keeps
/// its own messages under `_root`.
///
/// ```json
/// {
///   "errors": {
///     "items": {
///       "0": { "_root": ["Item is invalid"], "name": ["Name is required"] }
///     }
///   }
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct NestedFormatter;

impl NestedFormatter {
    /// Creates a new nested formatter.
    pub fn new() -> Self {
        Self
    }

    /// Folds all violations into an error tree.
    ///
    /// # Example
    ///
    /// ```rust
    /// use violation_response::{NestedFormatter, Violation, ViolationList};
    ///
    /// let violations: ViolationList = vec![
    ///     Violation::new("items[0].name", "Name is required"),
    ///     Violation::new("items[1].city", "City is invalid"),
    /// ]
    /// .into();
    ///
    /// let tree = NestedFormatter::new().build_tree(&violations);
    /// let first = tree.get("items").and_then(|items| items.get("0")).unwrap();
    /// assert_eq!(first.get("name").unwrap().messages(), &["Name is required"]);
    /// ```
    pub fn build_tree(&self, violations: &ViolationList) -> ErrorNode {
        let mut builder = TreeBuilder::new();
        for violation in violations {
            let path = violation.property_path();
            builder.insert(path.as_slice(), violation.message.as_str());
        }
        builder.build()
    }
}

impl Formatter for NestedFormatter {
    fn format(&self, violations: &ViolationList) -> Value {
        json!({ "errors": self.build_tree(violations).to_value() })
    }
}
