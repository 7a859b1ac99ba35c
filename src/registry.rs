//! Formatter registry for named formatter lookup.
//!
//! This module provides the [`FormatterRegistry`] type that stores
//! formatters under their format names so a response can be produced with
//! whichever format a caller selects.

use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use crate::config::ResponseConfig;
use crate::error::ViolationList;
use crate::formatter::{FormatKind, Formatter};

/// Type alias for the formatter storage map.
type FormatterMap = Arc<RwLock<HashMap<String, Arc<dyn Formatter>>>>;

/// A thread-safe registry of named formatters.
///
/// # Thread Safety
///
/// The registry uses `Arc<RwLock<...>>` for thread-safe access:
/// - Multiple threads can look up and format concurrently (read-only access)
/// - Registration operations are serialized (write access)
///
/// Clones share the same storage.
///
/// # Example
///
/// ```rust
/// use violation_response::{FormatterRegistry, ResponseConfig, Violation, ViolationList};
/// use serde_json::json;
///
/// let registry = FormatterRegistry::with_builtins(&ResponseConfig::default());
/// let violations = ViolationList::single(Violation::new("user.email", "invalid"));
///
/// let body = registry.format("nested", &violations).unwrap();
/// assert_eq!(body, json!({"errors": {"user": {"email": ["invalid"]}}}));
///
/// assert!(registry.format("yaml", &violations).is_err());
/// ```
pub struct FormatterRegistry {
    formatters: FormatterMap,
}

impl FormatterRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self {
            formatters: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Creates a registry holding the three built-in formatters under their
    /// canonical names, with the problem details formatter configured from
    /// `config`.
    pub fn with_builtins(config: &ResponseConfig) -> Self {
        let registry = Self::new();
        {
            let mut formatters = registry.formatters.write();
            for kind in FormatKind::ALL {
                formatters.insert(kind.as_str().to_string(), config.formatter_for(kind));
            }
        }
        registry
    }

    /// Registers a formatter under the given name.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateName` if the name is already registered.
    ///
    /// # Example
    ///
    /// ```rust
    /// use violation_response::{FlatFormatter, FormatterRegistry};
    ///
    /// let registry = FormatterRegistry::new();
    /// registry.register("flat", FlatFormatter::new()).unwrap();
    ///
    /// // Duplicate registration fails
    /// assert!(registry.register("flat", FlatFormatter::new()).is_err());
    /// ```
    pub fn register<F>(&self, name: impl Into<String>, formatter: F) -> Result<(), RegistryError>
    where
        F: Formatter + 'static,
    {
        let name = name.into();
        let mut formatters = self.formatters.write();

        if formatters.contains_key(&name) {
            return Err(RegistryError::DuplicateName(name));
        }

        tracing::debug!(format = %name, "registered formatter");
        formatters.insert(name, Arc::new(formatter));
        Ok(())
    }

    /// Retrieves a formatter by name.
    ///
    /// A name that isn't registered as spelled but parses as a
    /// [`FormatKind`] (such as the legacy `simple-nested`) is looked up
    /// under the kind's canonical name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Formatter>> {
        let formatters = self.formatters.read();
        if let Some(formatter) = formatters.get(name) {
            return Some(Arc::clone(formatter));
        }

        let kind = name.parse::<FormatKind>().ok()?;
        formatters.get(kind.as_str()).cloned()
    }

    /// Returns true if [`FormatterRegistry::get`] would find `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Returns the registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.formatters.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Formats violations with the named formatter.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::FormatterNotFound` if the name isn't registered.
    pub fn format(&self, name: &str, violations: &ViolationList) -> Result<Value, RegistryError> {
        let formatter = self
            .get(name)
            .ok_or_else(|| RegistryError::FormatterNotFound(name.to_string()))?;

        Ok(formatter.format(violations))
    }
}

impl Default for FormatterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for FormatterRegistry {
    fn clone(&self) -> Self {
        Self {
            formatters: Arc::clone(&self.formatters),
        }
    }
}

/// Errors that can occur during registry operations.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Attempted to register a formatter with a name that already exists.
    #[error("formatter '{0}' already registered")]
    DuplicateName(String),

    /// Attempted to format with a name that isn't registered.
    #[error("formatter '{0}' not found")]
    FormatterNotFound(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Violation;
    use serde_json::json;

    struct CountFormatter;

    impl Formatter for CountFormatter {
        fn format(&self, violations: &ViolationList) -> Value {
            json!({ "count": violations.len() })
        }
    }

    #[test]
    fn test_builtins_registered() {
        let registry = FormatterRegistry::with_builtins(&ResponseConfig::default());
        assert_eq!(registry.names(), vec!["nested", "rfc7807", "simple"]);
        assert!(!registry.contains("yaml"));
    }

    #[test]
    fn test_legacy_name_resolves_to_canonical() {
        let registry = FormatterRegistry::with_builtins(&ResponseConfig::default());
        let violations = ViolationList::single(Violation::new("a.b", "bad"));

        assert!(registry.contains("simple-nested"));
        assert_eq!(
            registry.format("simple-nested", &violations).unwrap(),
            registry.format("nested", &violations).unwrap()
        );
    }

    #[test]
    fn test_exact_name_wins_over_canonical() {
        let registry = FormatterRegistry::with_builtins(&ResponseConfig::default());
        registry.register("simple-nested", CountFormatter).unwrap();

        let body = registry.format("simple-nested", &ViolationList::new()).unwrap();
        assert_eq!(body, json!({"count": 0}));
    }

    #[test]
    fn test_builtin_problem_details_uses_config() {
        let config = ResponseConfig::default().with_problem_title("Order rejected");
        let registry = FormatterRegistry::with_builtins(&config);

        let body = registry.format("rfc7807", &ViolationList::new()).unwrap();
        assert_eq!(body["title"], "Order rejected");
    }

    #[test]
    fn test_register_custom_formatter() {
        let registry = FormatterRegistry::new();
        registry.register("count", CountFormatter).unwrap();

        let violations = ViolationList::single(Violation::new("a", "bad"));
        assert_eq!(registry.format("count", &violations).unwrap(), json!({"count": 1}));
    }

    #[test]
    fn test_duplicate_name() {
        let registry = FormatterRegistry::with_builtins(&ResponseConfig::default());
        match registry.register("simple", CountFormatter) {
            Err(RegistryError::DuplicateName(name)) => assert_eq!(name, "simple"),
            other => panic!("expected duplicate name, got {:?}", other),
        }
    }

    #[test]
    fn test_not_found() {
        let registry = FormatterRegistry::new();
        let result = registry.format("simple", &ViolationList::new());
        assert!(matches!(result, Err(RegistryError::FormatterNotFound(ref name)) if name == "simple"));
    }

    #[test]
    fn test_clones_share_storage() {
        let registry = FormatterRegistry::new();
        let clone = registry.clone();
        clone.register("count", CountFormatter).unwrap();
        assert!(registry.contains("count"));
    }
}
