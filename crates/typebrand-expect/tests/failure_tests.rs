use super::*;
use crate::{TypeSession, expect_type_of_value};
use serde_json::json;
use typebrand_solver::{TypeId, mismatch_info};

fn extra_property_failure(session: &TypeSession) -> ExpectationFailure {
    expect_type_of_value(session, &json!({ "a": 1, "b": 1 }))
        .to_equal_type_of("{ a: number }")
        .unwrap_err()
}

#[test]
fn test_report_from_info() {
    let session = TypeSession::new();
    let solver = session.solver();
    let actual = session.lower("{ a: number; b: number }").unwrap();
    let expected = session.lower("{ a: number }").unwrap();
    let report = MismatchReport::from_info(solver, &mismatch_info(solver, actual, expected));
    let MismatchReport::Properties(map) = report else {
        panic!("expected a property report");
    };
    assert_eq!(map.get("a"), Some(&MismatchReport::Ok("number".to_string())));
    assert_eq!(
        map.get("b"),
        Some(&MismatchReport::Message(
            "Expected: never, Actual: number".to_string()
        ))
    );

    let same = MismatchReport::from_info(solver, &mismatch_info(solver, TypeId::STRING, TypeId::STRING));
    assert_eq!(same, MismatchReport::Ok("string".to_string()));
}

#[test]
fn test_display() {
    let session = TypeSession::new();
    let failure = extra_property_failure(&session);
    assert_eq!(
        failure.to_string(),
        "toEqualTypeOf failed: types are not equal\n\
         \x20 actual:   { a: number; b: number; }\n\
         \x20 expected: { a: number; }\n\
         \x20 at .b: Expected: never, Actual: number\n"
    );
}

#[test]
fn test_json_rendering() {
    let session = TypeSession::new();
    let failure = extra_property_failure(&session);
    let value: serde_json::Value = serde_json::from_str(&failure.to_json()).unwrap();
    assert_eq!(
        value,
        json!({
            "kind": "mismatch",
            "assertion": "toEqualTypeOf",
            "actual": "{ a: number; b: number; }",
            "expected": "{ a: number; }",
            "message": "types are not equal",
            "mismatch": {
                "properties": {
                    "a": { "ok": "number" },
                    "b": { "message": "Expected: never, Actual: number" }
                }
            }
        })
    );
}

#[test]
fn test_negated_failures_have_no_report() {
    let session = TypeSession::new();
    let failure = expect_type_of_value(&session, &json!("x"))
        .not()
        .to_be_string()
        .unwrap_err();
    assert_eq!(failure.kind, FailureKind::Negated);
    assert!(!failure.to_json().contains("\"mismatch\""));
    assert!(failure.to_string().starts_with("toBeString failed: "));
}
