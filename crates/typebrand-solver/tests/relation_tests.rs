use super::*;
use crate::lower::{TypeEnv, lower_type_source};

fn lower(solver: &Solver, source: &str) -> TypeId {
    lower_type_source(solver, &TypeEnv::new(), source).unwrap()
}

fn assignable(solver: &Solver, source: &str, target: &str) -> bool {
    let source = lower(solver, source);
    let target = lower(solver, target);
    SubtypeChecker::new(solver).is_assignable(source, target)
}

#[test]
fn test_special_types() {
    let solver = Solver::new();
    assert!(assignable(&solver, "any", "string"));
    assert!(!assignable(&solver, "any", "never"));
    assert!(assignable(&solver, "never", "string"));
    assert!(assignable(&solver, "string", "unknown"));
    assert!(!assignable(&solver, "unknown", "string"));
    assert!(assignable(&solver, "unknown", "any"));
}

#[test]
fn test_primitives_and_literals() {
    let solver = Solver::new();
    assert!(assignable(&solver, "\"a\"", "string"));
    assert!(!assignable(&solver, "string", "\"a\""));
    assert!(assignable(&solver, "undefined", "void"));
    assert!(!assignable(&solver, "void", "undefined"));
    assert!(!assignable(&solver, "null", "undefined"));
    assert!(assignable(&solver, "string", "{}"));
    assert!(!assignable(&solver, "string", "object"));
    assert!(!assignable(&solver, "string", "{ length: number }"));
}

#[test]
fn test_unions_distribute_over_the_source() {
    let solver = Solver::new();
    assert!(assignable(&solver, "1 | 2", "number"));
    assert!(!assignable(&solver, "number", "1 | 2"));
    assert!(assignable(&solver, "boolean", "true | false | string"));
    assert!(!assignable(&solver, "string | number", "string"));
}

#[test]
fn test_object_properties() {
    let solver = Solver::new();
    assert!(assignable(&solver, "{ a: string; b: number }", "{ a: string }"));
    assert!(!assignable(&solver, "{ a: string }", "{ a: string; b: number }"));
    assert!(!assignable(&solver, "{ a?: string }", "{ a: string }"));
    assert!(assignable(&solver, "{}", "{ a?: string }"));
    assert!(assignable(&solver, "{ readonly a: string }", "{ a: string }"));
    assert!(assignable(&solver, "{ a: string }", "{ readonly a: string }"));
}

#[test]
fn test_index_signatures() {
    let solver = Solver::new();
    assert!(assignable(&solver, "{ a: 1; b: 2 }", "{ [k: string]: number }"));
    assert!(!assignable(&solver, "{ a: \"x\" }", "{ [k: string]: number }"));
    assert!(assignable(&solver, "{ a: \"x\"; 0: 1 }", "{ [k: number]: number }"));
}

#[test]
fn test_readonly_arrays_are_not_mutable() {
    let solver = Solver::new();
    assert!(assignable(&solver, "string[]", "readonly string[]"));
    assert!(!assignable(&solver, "readonly string[]", "string[]"));
    assert!(assignable(&solver, "[string, number]", "(string | number)[]"));
    assert!(!assignable(&solver, "string[]", "[string]"));
}

#[test]
fn test_tuples() {
    let solver = Solver::new();
    assert!(assignable(&solver, "[1, 2]", "[number, number]"));
    assert!(assignable(&solver, "[string]", "[string, number?]"));
    assert!(!assignable(&solver, "[string, number?]", "[string]"));
    assert!(assignable(&solver, "[string, number, number]", "[string, ...number[]]"));
    assert!(!assignable(&solver, "[string, ...number[]]", "[string, number]"));
}

#[test]
fn test_function_parameters_are_contravariant() {
    let solver = Solver::new();
    assert!(assignable(&solver, "(a: string) => void", "(a: \"x\") => void"));
    assert!(!assignable(&solver, "(a: \"x\") => void", "(a: string) => void"));
    assert!(assignable(&solver, "() => number", "(a: string) => number"));
    assert!(!assignable(&solver, "(a: string) => number", "() => number"));
    assert!(assignable(&solver, "() => number", "() => void"));
    assert!(!assignable(&solver, "() => number", "() => string"));
}

#[test]
fn test_named_types() {
    let solver = Solver::new();
    assert!(assignable(&solver, "Promise<1>", "Promise<number>"));
    assert!(!assignable(&solver, "Promise<number>", "Promise<1>"));
    assert!(assignable(&solver, "() => void", "Function"));
    assert!(!assignable(&solver, "{ a: 1 }", "Function"));
}
