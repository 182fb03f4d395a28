//! # Schema Property Tests
//!
//! Properties every schema must hold for arbitrary input:
//!
//! - **Idempotence of success**: re-validating a successful output yields
//!   the same output.
//! - **Exclusivity**: every outcome is exactly one of success or failure,
//!   and failures always carry at least one issue.
//! - **Absence precedence**: an optional accepts `null` whatever it wraps.
//! - **Unknown-key dropping**: object output only ever has shape keys.

use envshape_core::Outcome;
use envshape_schema::{
    boolean, custom, lenient, number, object, optional, string, Schema, Shape,
};
use proptest::prelude::*;
use serde_json::Value;

/// Strategy for arbitrary JSON values, biased toward the text shapes the
/// primitive schemas coerce.
fn json_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| serde_json::json!(n)),
        (-1.0e6f64..1.0e6).prop_map(|f| serde_json::json!(f)),
        "[a-zA-Z0-9_ .+-]{0,12}".prop_map(Value::String),
        prop_oneof![
            Just("true"), Just("False"), Just("1"), Just("0"), Just("on"), Just("3.14"),
            Just(" 42 "), Just(""), Just("NaN"), Just("1e3"),
        ]
        .prop_map(|s| Value::String(s.to_string())),
    ];
    leaf.prop_recursive(3, 32, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-z]{1,6}", inner, 0..5)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

fn all_schemas() -> Vec<Box<dyn Schema>> {
    vec![
        Box::new(string()),
        Box::new(number()),
        Box::new(boolean()),
        Box::new(optional(number())),
        Box::new(lenient::boolean()),
        Box::new(lenient::number()),
        Box::new(object(
            Shape::new()
                .field("a", string())
                .field("b", optional(boolean())),
        )),
    ]
}

proptest! {
    /// Coercion is stable under re-application.
    #[test]
    fn successful_output_revalidates_to_itself(input in json_value()) {
        for schema in all_schemas() {
            if let Outcome::Success { value } = schema.validate(&input).resolve() {
                let again = schema.validate(&value).resolve();
                prop_assert_eq!(
                    again,
                    Outcome::success(value.clone()),
                    "schema {} not idempotent for {}",
                    schema.kind(),
                    input
                );
            }
        }
    }

    /// Failures are never empty.
    #[test]
    fn failures_carry_issues(input in json_value()) {
        for schema in all_schemas() {
            let outcome = schema.validate(&input).resolve();
            prop_assert!(outcome.is_success() != outcome.is_failure());
            if outcome.is_failure() {
                prop_assert!(!outcome.issues().is_empty());
            }
        }
    }

    /// Primitive schemas fail with exactly one path-less issue.
    #[test]
    fn primitive_failures_are_single_and_pathless(input in json_value()) {
        let primitives: Vec<Box<dyn Schema>> =
            vec![Box::new(string()), Box::new(number()), Box::new(boolean())];
        for schema in primitives {
            if let Outcome::Failure { issues } = schema.validate(&input).resolve() {
                prop_assert_eq!(issues.len(), 1);
                prop_assert!(issues[0].path.is_empty());
                prop_assert_eq!(issues[0].message.as_str(), schema.message());
            }
        }
    }

    /// Object output never leaks undeclared keys.
    #[test]
    fn object_output_only_has_shape_keys(
        entries in prop::collection::btree_map("[a-z]{1,4}", "[a-z]{0,4}", 0..8)
    ) {
        let schema = object(
            Shape::new()
                .field("ab", optional(string()))
                .field("cd", optional(string())),
        );
        let input = Value::Object(
            entries.into_iter().map(|(k, v)| (k, Value::String(v))).collect(),
        );
        let outcome = schema.validate(&input).resolve();
        prop_assert!(outcome.is_success());
        if let Some(Value::Object(output)) = outcome.value() {
            let keys: Vec<&str> = output.keys().map(String::as_str).collect();
            prop_assert_eq!(keys, vec!["ab", "cd"]);
        }
    }
}

#[test]
fn optional_accepts_null_even_over_a_reject_all_schema() {
    let reject_all = custom("nothing is valid", |_| Outcome::fail("nothing is valid"));
    let schema = optional(reject_all);
    assert_eq!(schema.validate(&Value::Null).resolve(), Outcome::success(Value::Null));
}
