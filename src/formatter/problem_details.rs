//! RFC 7807 problem details formatter.
//!
//! See <https://www.rfc-editor.org/rfc/rfc7807.html>.

use serde::Serialize;
use serde_json::{json, Value};

use super::Formatter;
use crate::error::ViolationList;

/// Default problem `type` URI.
pub const DEFAULT_PROBLEM_TYPE: &str = "about:blank";

/// Default problem `title`.
pub const DEFAULT_PROBLEM_TITLE: &str = "Validation Failed";

/// The `status` embedded in every problem document.
///
/// This is fixed and does not follow the status code a responder is
/// configured with.
pub const PROBLEM_STATUS: u16 = 422;

/// One entry of the `violations` member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProblemViolation {
    /// Raw property path.
    pub field: String,
    /// Human-readable message.
    pub message: String,
    /// Machine-readable code, rendered as `null` when absent.
    pub code: Option<String>,
}

/// A problem details document.
///
/// Serializes with the members in RFC 7807 order: `type`, `title`,
/// `status`, `detail`, then the `violations` extension member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProblemDetails {
    /// URI reference identifying the problem type.
    #[serde(rename = "type")]
    pub problem_type: String,
    /// Short summary of the problem type.
    pub title: String,
    /// Embedded status, always [`PROBLEM_STATUS`].
    pub status: u16,
    /// `"<N> validation error(s) detected"`.
    pub detail: String,
    /// The violations, in input order.
    pub violations: Vec<ProblemViolation>,
}

impl ProblemDetails {
    /// Renders the document as JSON.
    pub fn to_value(&self) -> Value {
        json!(self)
    }
}

/// Projects violations into an RFC 7807 problem details document.
///
/// The `type` and `title` members come from configuration; `status` is
/// always 422 and `detail` counts the violations.
///
/// # Example
///
/// ```rust
/// use violation_response::{Formatter, ProblemDetailsFormatter, Violation, ViolationList};
/// use serde_json::json;
///
/// let formatter = ProblemDetailsFormatter::new()
///     .with_type("https://example.com/probs/validation")
///     .with_title("Invalid order");
///
/// let violations = ViolationList::single(Violation::new("price", "must be positive").with_code("c1"));
///
/// assert_eq!(
///     formatter.format(&violations),
///     json!({
///         "type": "https://example.com/probs/validation",
///         "title": "Invalid order",
///         "status": 422,
///         "detail": "1 validation error detected",
///         "violations": [{"field": "price", "message": "must be positive", "code": "c1"}]
///     })
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemDetailsFormatter {
    problem_type: String,
    title: String,
}

impl Default for ProblemDetailsFormatter {
    fn default() -> Self {
        Self {
            problem_type: DEFAULT_PROBLEM_TYPE.to_string(),
            title: DEFAULT_PROBLEM_TITLE.to_string(),
        }
    }
}

impl ProblemDetailsFormatter {
    /// Creates a formatter with the default type and title.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the problem `type` URI.
    pub fn with_type(mut self, problem_type: impl Into<String>) -> Self {
        self.problem_type = problem_type.into();
        self
    }

    /// Sets the problem `title`.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Returns the configured problem `type`.
    pub fn problem_type(&self) -> &str {
        &self.problem_type
    }

    /// Returns the configured `title`.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Builds the typed document for the violations.
    pub fn problem(&self, violations: &ViolationList) -> ProblemDetails {
        let count = violations.len();

        ProblemDetails {
            problem_type: self.problem_type.clone(),
            title: self.title.clone(),
            status: PROBLEM_STATUS,
            detail: format!(
                "{} validation {} detected",
                count,
                if count == 1 { "error" } else { "errors" }
            ),
            violations: violations
                .iter()
                .map(|v| ProblemViolation {
                    field: v.path.clone(),
                    message: v.message.clone(),
                    code: v.code.clone(),
                })
                .collect(),
        }
    }
}

impl Formatter for ProblemDetailsFormatter {
    fn format(&self, violations: &ViolationList) -> Value {
        self.problem(violations).to_value()
    }
}
