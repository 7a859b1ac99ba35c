//! Integration tests for Violation and ViolationList.

use stillwater::prelude::*;
use violation_response::{InputError, Violation, ViolationList};

#[test]
fn test_violation_full_context() {
    let violation = Violation::new("email", "This value is not a valid email address.")
        .with_code("bd79c0ab-ddba-46cc-a703-a7a4b08de310");

    assert_eq!(violation.path, "email");
    assert_eq!(violation.message, "This value is not a valid email address.");
    assert_eq!(
        violation.code.as_deref(),
        Some("bd79c0ab-ddba-46cc-a703-a7a4b08de310")
    );
}

#[test]
fn test_lists_combine_via_semigroup() {
    let l1 = ViolationList::single(Violation::new("name", "name is required"));
    let l2 = ViolationList::single(Violation::new("email", "email is invalid"));
    let l3 = ViolationList::new();

    let combined = l1.combine(l2).combine(l3);

    assert_eq!(combined.len(), 2);
    let messages: Vec<&str> = combined.iter().map(|v| v.message.as_str()).collect();
    assert_eq!(messages, vec!["name is required", "email is invalid"]);
}

#[test]
fn test_empty_list() {
    let list = ViolationList::new();
    assert!(list.is_empty());
    assert_eq!(list.len(), 0);
    assert_eq!(list.iter().count(), 0);
}

#[test]
fn test_decode_from_json_text() {
    let input = r#"[
        {"path": "name", "message": "This value should not be blank.", "code": "c1051bb4"},
        {"path": "price", "message": "This value should be positive.", "code": null},
        {"path": "", "message": "Product is invalid."}
    ]"#;

    let list = ViolationList::from_json_str(input).unwrap();
    assert_eq!(list.len(), 3);
    assert_eq!(list.with_code("c1051bb4").len(), 1);
    assert_eq!(list.at_path("").len(), 1);
}

#[test]
fn test_decode_failures_are_distinct() {
    let error = ViolationList::from_json_str(r#"{"name": ""#).unwrap_err();
    assert!(matches!(error, InputError::Deserialize(_)));
    assert!(error.to_string().starts_with("failed to deserialize violations"));

    let error = ViolationList::from_json_str(r#"{"name": ""}"#).unwrap_err();
    assert!(matches!(error, InputError::NotAnArray));

    let error = ViolationList::from_json_str(r#"[{"message": "no path"}]"#).unwrap_err();
    assert_eq!(
        error.to_string(),
        "invalid violation at index 0: missing field `path`"
    );

    let error = ViolationList::from_json_str(r#"[{"path": "a", "message": "m", "code": 7}]"#)
        .unwrap_err();
    assert!(matches!(error, InputError::InvalidEntry { index: 0, .. }));
    assert!(error.to_string().contains("expected a string"));
}

#[test]
fn test_report_lists_every_violation() {
    let list: ViolationList = vec![
        Violation::new("name", "This value should not be blank."),
        Violation::new("price", "This value should be positive."),
    ]
    .into();

    let report = list.to_string();
    let lines: Vec<&str> = report.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Validation failed (2 errors)",
            "  ✗ name: This value should not be blank.",
            "  ✗ price: This value should be positive.",
        ]
    );
}
