// Snapshot-stringify behavior used for text-based comparisons.

use serde_json::json;
use weeklydigest::testkit::stringify;

#[test]
fn test_no_embedded_newlines() {
    let value = json!({
        "collectives": [
            {"slug": "slug1", "tags": ["open source"]},
            {"slug": "slug2", "tags": []}
        ],
        "totals": {"USD": 5000, "EUR": 2000}
    });

    assert!(!stringify(&value).contains('\n'));
}

#[test]
fn test_array_collapses_onto_one_line() {
    assert_eq!(stringify(&json!({"a": [1, 2]})), r#"{ "a": [ 1, 2 ] }"#);
}

#[test]
fn test_structurally_identical_inputs_compare_equal() {
    let a = json!({"x": [1, {"y": "z"}], "w": null});
    let b = json!({"x": [1, {"y": "z"}], "w": null});

    assert_eq!(stringify(&a), stringify(&b));
}

#[test]
fn test_order_sensitive_not_normalized() {
    // Array order matters; the transform never reorders elements.
    assert_ne!(stringify(&json!([1, 2])), stringify(&json!([2, 1])));
}

#[test]
fn test_scalars_pass_through() {
    assert_eq!(stringify(&json!(42)), "42");
    assert_eq!(stringify(&json!("text")), r#""text""#);
}
