use super::*;
use serde_json::json;
use typebrand_solver::lower_type_source;
use typebrand_solver::TypeEnv;

fn lower(solver: &Solver, source: &str) -> TypeId {
    lower_type_source(solver, &TypeEnv::new(), source).unwrap()
}

#[test]
fn test_widened_values() {
    let solver = Solver::new();
    let value = json!({ "a": 1, "b": ["x", null], "c": { "d": true } });
    assert_eq!(
        value_type(&solver, &value, Widening::Widen),
        lower(&solver, "{ a: number; b: (string | null)[]; c: { d: boolean } }")
    );
    assert_eq!(
        value_type(&solver, &json!([]), Widening::Widen),
        lower(&solver, "never[]")
    );
}

#[test]
fn test_const_values_keep_literals() {
    let solver = Solver::new();
    let value = json!({ "a": 1, "b": ["x", false] });
    assert_eq!(
        value_type(&solver, &value, Widening::Const),
        lower(&solver, "{ readonly a: 1; readonly b: readonly [\"x\", false] }")
    );
}
