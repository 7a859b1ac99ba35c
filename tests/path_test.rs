//! Integration tests for PropertyPath.

use violation_response::PropertyPath;

fn segments(path: &str) -> Vec<String> {
    PropertyPath::parse(path).into_segments()
}

#[test]
fn test_path_parsing() {
    // Root path
    assert!(PropertyPath::parse("").is_root());
    assert_eq!(PropertyPath::parse(""), PropertyPath::root());

    // Simple field
    assert_eq!(segments("name"), vec!["name"]);

    // Complex nested path
    let path = PropertyPath::parse("users[0].address.city");
    assert_eq!(path.len(), 4);
    assert_eq!(path.as_slice(), &["users", "0", "address", "city"]);
}

#[test]
fn test_index_segments_are_plain_strings() {
    let path = PropertyPath::parse("items[12].tags[3]");
    let collected: Vec<&str> = path.segments().collect();
    assert_eq!(collected, vec!["items", "12", "tags", "3"]);
}

#[test]
fn test_map_keys_with_quotes() {
    assert_eq!(segments(r#"translations["fr"].title"#), vec!["translations", "fr", "title"]);
    assert_eq!(segments("translations['fr'].title"), vec!["translations", "fr", "title"]);
    assert_eq!(segments(r#"a["'mixed'"]"#), vec!["a", "mixed"]);
}

#[test]
fn test_malformed_paths_degrade() {
    assert_eq!(segments("a..b"), vec!["a", "b"]);
    assert_eq!(segments("a."), vec!["a"]);
    assert_eq!(segments("a[]"), vec!["a", ""]);
    assert_eq!(segments("a]b"), vec!["a", "b"]);
    assert_eq!(segments("a[0"), vec!["a", "0"]);
}

#[test]
fn test_parse_is_deterministic() {
    let first = PropertyPath::parse("order.lines[2].sku");
    let second = PropertyPath::parse("order.lines[2].sku");
    assert_eq!(first, second);
}
