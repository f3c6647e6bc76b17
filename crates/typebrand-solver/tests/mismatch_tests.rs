use super::*;
use crate::lower::{TypeEnv, lower_type_source};

fn info(solver: &Solver, actual: &str, expected: &str) -> MismatchInfo {
    let env = TypeEnv::new();
    let actual = lower_type_source(solver, &env, actual).unwrap();
    let expected = lower_type_source(solver, &env, expected).unwrap();
    mismatch_info(solver, actual, expected)
}

fn message(text: &str) -> MismatchInfo {
    MismatchInfo::Message(text.to_string())
}

#[test]
fn test_leaf_messages() {
    let solver = Solver::new();
    assert_eq!(
        info(&solver, "string", "number"),
        message("Expected: number, Actual: string")
    );
    assert_eq!(
        info(&solver, "any", "string"),
        message("Expected: string, Actual: any")
    );
    assert_eq!(
        info(&solver, "\"a\" | \"b\"", "\"a\""),
        message("Expected: literal string: a, Actual: literal string: b")
    );
    assert_eq!(info(&solver, "string", "string"), MismatchInfo::Ok(TypeId::STRING));
}

#[test]
fn test_object_properties_are_walked() {
    let solver = Solver::new();
    let result = info(&solver, "{ a: 1; b: 1 }", "{ a: number }");
    let MismatchInfo::Properties(map) = &result else {
        panic!("expected properties, got {result:?}");
    };
    assert_eq!(map.keys().collect::<Vec<_>>(), ["a", "b"]);
    assert_eq!(map["a"], message("Expected: number, Actual: never"));
    assert_eq!(map["b"], message("Expected: never, Actual: literal number: 1"));
    assert!(!result.is_ok());
}

#[test]
fn test_missing_actual_keys_come_after_actual_keys() {
    let solver = Solver::new();
    let MismatchInfo::Properties(map) = info(&solver, "{ b: string }", "{ a: string; b: string }")
    else {
        panic!("expected properties");
    };
    assert_eq!(map.keys().collect::<Vec<_>>(), ["b", "a"]);
    assert!(map["b"].is_ok());
    assert_eq!(map["a"], message("Expected: string, Actual: never"));
}

#[test]
fn test_arrays_and_tuples() {
    let solver = Solver::new();
    assert_eq!(
        info(&solver, "string[]", "number[]"),
        MismatchInfo::Array(Box::new(message("Expected: number, Actual: string")))
    );
    let MismatchInfo::Properties(map) = info(&solver, "[1, 2]", "[1, 3]") else {
        panic!("expected positional properties");
    };
    assert!(map["0"].is_ok());
    assert_eq!(
        map["1"],
        message("Expected: literal number: 3, Actual: literal number: 2")
    );
}

#[test]
fn test_nested_message_paths() {
    let solver = Solver::new();
    let result = info(
        &solver,
        "{ a: { b: string }; c: number[] }",
        "{ a: { b: number }; c: string[] }",
    );
    assert_eq!(
        result.messages(),
        vec![
            (".a.b".to_string(), "Expected: number, Actual: string"),
            (".c[number]".to_string(), "Expected: string, Actual: number"),
        ]
    );
}

#[test]
fn test_equal_objects_are_ok() {
    let solver = Solver::new();
    let result = info(&solver, "{ a: { b: string } }", "{ a: { b: string } }");
    assert!(result.is_ok());
    assert!(result.messages().is_empty());
}
