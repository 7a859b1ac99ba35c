//! Violation records and ordered violation lists.
//!
//! This module provides [`Violation`] for a single field-level failure and
//! [`ViolationList`] for the ordered collection handed to formatters.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use stillwater::prelude::*;

use super::InputError;
use crate::path::PropertyPath;

/// A single field-level validation failure.
///
/// `Violation` captures what the upstream validation engine reports:
/// - **path**: the raw property path (`items[0].name`); empty for the root object
/// - **message**: human-readable description of the failure
/// - **code**: optional machine-readable identifier
///
/// # Example
///
/// ```rust
/// use violation_response::Violation;
///
/// let violation = Violation::new("email", "This value is not a valid email address.")
///     .with_code("bd79c0ab-ddba-46cc-a703-a7a4b08de310");
///
/// assert_eq!(violation.path, "email");
/// assert!(violation.code.is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Violation {
    /// The raw property path of the offending value.
    pub path: String,
    /// Human-readable error message.
    pub message: String,
    /// Machine-readable error code, if the engine supplied one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl Violation {
    /// Creates a new violation with the given path and message and no code.
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            code: None,
        }
    }

    /// Creates a violation against the root object.
    pub fn root(message: impl Into<String>) -> Self {
        Self::new("", message)
    }

    /// Sets the error code and returns self for chaining.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Returns true if this violation targets the root object.
    pub fn is_root(&self) -> bool {
        self.path.is_empty()
    }

    /// Parses the raw path into segments.
    pub fn property_path(&self) -> PropertyPath {
        PropertyPath::parse(&self.path)
    }
}

impl Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = if self.is_root() { "(root)" } else { &self.path };
        write!(f, "{}: {}", path, self.message)
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Violation>();
    assert_sync::<Violation>();
};

/// An ordered collection of violations.
///
/// Unlike a validation failure, a `ViolationList` may be empty: every
/// formatter produces a well-formed, empty-content result for it. Order is
/// significant, messages for the same path keep their encounter order.
///
/// # Combining Lists
///
/// `ViolationList` implements `Semigroup`, so violations gathered from
/// several sources can be concatenated:
///
/// ```rust
/// use violation_response::{Violation, ViolationList};
/// use stillwater::prelude::*;
///
/// let first = ViolationList::single(Violation::new("name", "required"));
/// let second = ViolationList::single(Violation::new("email", "invalid format"));
///
/// let combined = first.combine(second);
/// assert_eq!(combined.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViolationList(Vec<Violation>);

impl ViolationList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a list containing a single violation.
    pub fn single(violation: Violation) -> Self {
        Self(vec![violation])
    }

    /// Appends a violation.
    pub fn push(&mut self, violation: Violation) {
        self.0.push(violation);
    }

    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no violations.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the violations in encounter order.
    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.0.iter()
    }

    /// Returns all violations reported at exactly this raw path.
    pub fn at_path(&self, path: &str) -> Vec<&Violation> {
        self.0.iter().filter(|v| v.path == path).collect()
    }

    /// Returns all violations carrying the given code.
    pub fn with_code(&self, code: &str) -> Vec<&Violation> {
        self.0
            .iter()
            .filter(|v| v.code.as_deref() == Some(code))
            .collect()
    }

    /// Converts this list into a `Vec<Violation>`.
    pub fn into_vec(self) -> Vec<Violation> {
        self.0
    }

    /// Returns the violations as a slice.
    pub fn as_slice(&self) -> &[Violation] {
        &self.0
    }

    /// Decodes a list from a JSON document.
    ///
    /// The document must be an array of objects with a string `path`, a
    /// string `message` and an optional `code` (string or `null`). Other
    /// members are ignored.
    ///
    /// # Errors
    ///
    /// Returns `InputError::Deserialize` if the text is not JSON, and
    /// `InputError::NotAnArray` or `InputError::InvalidEntry` if the JSON
    /// does not have the expected shape.
    ///
    /// # Example
    ///
    /// ```rust
    /// use violation_response::ViolationList;
    ///
    /// let list = ViolationList::from_json_str(
    ///     r#"[{"path": "price", "message": "must be positive", "code": null}]"#,
    /// ).unwrap();
    /// assert_eq!(list.len(), 1);
    ///
    /// assert!(ViolationList::from_json_str("{not json").is_err());
    /// ```
    pub fn from_json_str(input: &str) -> Result<Self, InputError> {
        let value: Value = serde_json::from_str(input)?;
        Self::from_json(&value)
    }

    /// Decodes a list from an already parsed JSON value.
    ///
    /// Entries are decoded one by one so a failure names the offending index.
    ///
    /// # Errors
    ///
    /// See [`ViolationList::from_json_str`].
    pub fn from_json(value: &Value) -> Result<Self, InputError> {
        let entries = value.as_array().ok_or(InputError::NotAnArray)?;

        entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                Violation::deserialize(entry).map_err(|source| InputError::InvalidEntry {
                    index,
                    reason: source.to_string(),
                })
            })
            .collect()
    }
}

impl Semigroup for ViolationList {
    fn combine(mut self, other: Self) -> Self {
        self.0.extend(other.0);
        self
    }
}

impl From<Vec<Violation>> for ViolationList {
    fn from(violations: Vec<Violation>) -> Self {
        Self(violations)
    }
}

impl FromIterator<Violation> for ViolationList {
    fn from_iter<I: IntoIterator<Item = Violation>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<Violation> for ViolationList {
    fn extend<I: IntoIterator<Item = Violation>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

/// Renders the console report: a summary line followed by one line per
/// violation, root violations shown as `(root)`.
impl Display for ViolationList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "Validation passed, no errors found.");
        }

        let count = self.len();
        writeln!(
            f,
            "Validation failed ({} error{})",
            count,
            if count > 1 { "s" } else { "" }
        )?;
        for violation in self.iter() {
            writeln!(f, "  ✗ {}", violation)?;
        }
        Ok(())
    }
}

impl IntoIterator for ViolationList {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ViolationList {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
