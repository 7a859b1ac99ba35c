//! Property path parsing.
//!
//! This module provides [`PropertyPath`], the parsed form of the property
//! path strings attached to violations (e.g. `items[0].address.city`).
//! Paths are split into plain string segments: a bracketed index and a
//! dotted identifier produce the same kind of segment.

use std::sync::LazyLock;

use regex::Regex;

static SEGMENT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^.\[\]]+|\[(.*?)\]").expect("segment pattern is valid"));

/// A parsed property path.
///
/// `PropertyPath` represents locations like `items[0].name` as an ordered
/// list of segments. The empty path is the root object itself.
///
/// # Example
///
/// ```rust
/// use violation_response::PropertyPath;
///
/// let path = PropertyPath::parse("items[0].address.city");
/// let segments: Vec<&str> = path.segments().collect();
///
/// assert_eq!(segments, vec!["items", "0", "address", "city"]);
/// assert_eq!(path.len(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct PropertyPath {
    segments: Vec<String>,
}

impl PropertyPath {
    /// Creates an empty path representing the root value.
    pub fn root() -> Self {
        Self::default()
    }

    /// Parses a property path string into segments.
    ///
    /// Two token shapes are recognised: a run of characters other than `.`,
    /// `[` and `]`, taken verbatim, and a `[...]` group whose content becomes
    /// a segment with surrounding quotes removed. Dots only separate.
    ///
    /// Parsing never fails. Malformed input degrades to whatever tokens can
    /// be recognised: an unterminated `[` is dropped and `[]` yields an
    /// empty segment.
    ///
    /// # Example
    ///
    /// ```rust
    /// use violation_response::PropertyPath;
    ///
    /// let path = PropertyPath::parse("metadata['release-date']");
    /// let segments: Vec<&str> = path.segments().collect();
    /// assert_eq!(segments, vec!["metadata", "release-date"]);
    ///
    /// assert!(PropertyPath::parse("").is_root());
    /// ```
    pub fn parse(path: &str) -> Self {
        let segments = SEGMENT_PATTERN
            .captures_iter(path)
            .map(|caps| match caps.get(1) {
                Some(inner) => inner
                    .as_str()
                    .trim_matches(|c| c == '"' || c == '\'')
                    .to_string(),
                None => caps[0].to_string(),
            })
            .collect();

        Self { segments }
    }

    /// Returns true if this is the root path (no segments).
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the number of segments in this path.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if this path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns an iterator over the path segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(String::as_str)
    }

    /// Returns the segments as a slice.
    pub fn as_slice(&self) -> &[String] {
        &self.segments
    }

    /// Consumes the path and returns its segments.
    pub fn into_segments(self) -> Vec<String> {
        self.segments
    }
}

impl From<&str> for PropertyPath {
    fn from(path: &str) -> Self {
        Self::parse(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(path: &str) -> Vec<String> {
        PropertyPath::parse(path).into_segments()
    }

    #[test]
    fn test_empty_path_is_root() {
        let path = PropertyPath::parse("");
        assert!(path.is_root());
        assert!(path.is_empty());
        assert_eq!(path.len(), 0);
        assert_eq!(path, PropertyPath::root());
    }

    #[test]
    fn test_single_field() {
        assert_eq!(parse("name"), vec!["name"]);
    }

    #[test]
    fn test_dotted_fields() {
        assert_eq!(parse("customer.address.city"), vec!["customer", "address", "city"]);
    }

    #[test]
    fn test_bracketed_index() {
        assert_eq!(parse("items[0].name"), vec!["items", "0", "name"]);
    }

    #[test]
    fn test_leading_index() {
        assert_eq!(parse("[3].name"), vec!["3", "name"]);
    }

    #[test]
    fn test_consecutive_brackets() {
        assert_eq!(parse("matrix[1][2]"), vec!["matrix", "1", "2"]);
    }

    #[test]
    fn test_quoted_keys_are_unquoted() {
        assert_eq!(parse(r#"meta["key"]"#), vec!["meta", "key"]);
        assert_eq!(parse("meta['key']"), vec!["meta", "key"]);
    }

    #[test]
    fn test_bracket_content_kept_verbatim() {
        assert_eq!(parse("headers[x.y]"), vec!["headers", "x.y"]);
    }

    #[test]
    fn test_empty_brackets_yield_empty_segment() {
        assert_eq!(parse("tags[]"), vec!["tags", ""]);
    }

    #[test]
    fn test_unterminated_bracket_is_dropped() {
        assert_eq!(parse("items[0"), vec!["items", "0"]);
    }

    #[test]
    fn test_stray_dots_are_ignored() {
        assert_eq!(parse(".a..b."), vec!["a", "b"]);
    }

    #[test]
    fn test_from_str() {
        let path: PropertyPath = "a.b".into();
        assert_eq!(path.as_slice(), &["a".to_string(), "b".to_string()]);
    }
}
