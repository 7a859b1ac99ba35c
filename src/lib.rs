//! # violation-response
//!
//! Turns a flat list of field-level validation violations into a structured
//! response body.
//!
//! ## Overview
//!
//! A validation engine reports failures as `(path, message, code)` records
//! where the path locates the offending field (`items[0].address.city`).
//! This crate formats such a list in one of three shapes:
//!
//! - **simple**: messages grouped by raw path
//! - **nested**: an object mirroring the path structure, with `_root` holding
//!   the messages of a node that also has children
//! - **rfc7807**: an RFC 7807 problem details document
//!
//! ## Core Types
//!
//! - [`Violation`] / [`ViolationList`]: the input records
//! - [`PropertyPath`]: a parsed property path
//! - [`TreeBuilder`] / [`ErrorNode`]: the nested error tree
//! - [`Formatter`]: implemented by [`FlatFormatter`], [`NestedFormatter`]
//!   and [`ProblemDetailsFormatter`]
//! - [`ResponseConfig`], [`FormatterRegistry`], [`ValidationResponder`]:
//!   format selection and status code
//!
//! ## Example
//!
//! ```rust
//! use violation_response::{Formatter, NestedFormatter, Violation, ViolationList};
//! use serde_json::json;
//!
//! let violations: ViolationList = vec![
//!     Violation::new("items[0]", "Item is invalid"),
//!     Violation::new("items[0].name", "Name is required"),
//!     Violation::new("items[1].address.city", "City is invalid"),
//! ]
//! .into();
//!
//! assert_eq!(
//!     NestedFormatter::new().format(&violations),
//!     json!({
//!         "errors": {
//!             "items": {
//!                 "0": {"_root": ["Item is invalid"], "name": ["Name is required"]},
//!                 "1": {"address": {"city": ["City is invalid"]}}
//!             }
//!         }
//!     })
//! );
//! ```

pub mod config;
pub mod error;
pub mod formatter;
pub mod path;
pub mod registry;
pub mod response;
pub mod tree;

pub use config::{ConfigError, ConfigErrors, ProblemDetailsConfig, ResponseConfig};
pub use error::{InputError, Violation, ViolationList};
pub use formatter::{
    FlatFormatter, FormatKind, Formatter, NestedFormatter, ProblemDetails,
    ProblemDetailsFormatter, ProblemViolation,
};
pub use path::PropertyPath;
pub use registry::{FormatterRegistry, RegistryError};
pub use response::{ResponderError, ValidationResponder, ValidationResponse};
pub use tree::{ErrorNode, TreeBuilder, ROOT_KEY};

/// Type alias for configuration results using ConfigErrors
pub type ConfigResult<T> = stillwater::Validation<T, ConfigErrors>;
