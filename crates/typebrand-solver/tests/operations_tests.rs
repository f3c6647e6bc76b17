use super::*;
use crate::lower::{TypeEnv, lower_type_source};

fn lower(solver: &Solver, source: &str) -> TypeId {
    lower_type_source(solver, &TypeEnv::new(), source).unwrap()
}

#[test]
fn test_distribution_expands_boolean() {
    let solver = Solver::new();
    let members = distribution_members(&solver, lower(&solver, "boolean | string"));
    assert_eq!(members.len(), 3);
    assert!(members.contains(&TypeId::TRUE));
    assert!(members.contains(&TypeId::FALSE));
    assert!(distribution_members(&solver, TypeId::NEVER).is_empty());
}

#[test]
fn test_literal_keys() {
    let solver = Solver::new();
    let interner = solver.interner();
    let keys = literal_keys(&solver, lower(&solver, "\"a\" | 0")).unwrap();
    assert!(keys.contains(&interner.intern_string("a")));
    assert!(keys.contains(&interner.intern_string("0")));
    assert_eq!(literal_keys(&solver, TypeId::STRING), None);
}

#[test]
fn test_modifier_mappings() {
    let solver = Solver::new();
    let t = lower(&solver, "{ a?: string; readonly b: number }");
    assert_eq!(
        required(&solver, t),
        lower(&solver, "{ a: string; readonly b: number }")
    );
    assert_eq!(
        writable(&solver, t),
        lower(&solver, "{ a?: string; b: number }")
    );
    assert_eq!(
        readonly(&solver, lower(&solver, "string[]")),
        lower(&solver, "readonly string[]")
    );
    assert_eq!(partial(&solver, TypeId::STRING), TypeId::STRING);
}

#[test]
fn test_record_and_conditional_filters() {
    let solver = Solver::new();
    assert_eq!(
        record(&solver, lower(&solver, "\"a\" | \"b\""), TypeId::NUMBER),
        Some(lower(&solver, "{ a: number; b: number }"))
    );
    assert_eq!(record(&solver, TypeId::BOOLEAN, TypeId::NUMBER), None);
    assert_eq!(
        extract(&solver, lower(&solver, "string | 1 | 2"), TypeId::NUMBER),
        lower(&solver, "1 | 2")
    );
    assert_eq!(
        non_nullable(&solver, lower(&solver, "string | null | undefined")),
        TypeId::STRING
    );
    assert_eq!(exclude(&solver, TypeId::ANY, TypeId::STRING), TypeId::ANY);
}

#[test]
fn test_signature_operators() {
    let solver = Solver::new();
    let f = lower(&solver, "(this: Date, a: string) => number");
    assert_eq!(parameters(&solver, f), Some(lower(&solver, "[a: string]")));
    assert_eq!(return_type(&solver, f), Some(TypeId::NUMBER));
    assert_eq!(this_parameter_type(&solver, f), solver.builtins().date);
    assert_eq!(
        this_parameter_type(&solver, lower(&solver, "() => void")),
        TypeId::UNKNOWN
    );
    assert_eq!(parameters(&solver, TypeId::STRING), None);
    assert_eq!(
        parameters(&solver, TypeId::ANY),
        Some(solver.interner().array(TypeId::UNKNOWN))
    );

    let c = lower(&solver, "new (a: number) => Date");
    assert_eq!(
        constructor_parameters(&solver, c),
        Some(lower(&solver, "[a: number]"))
    );
    assert_eq!(instance_type(&solver, c), Some(solver.builtins().date));
}

#[test]
fn test_promise_value_type() {
    let solver = Solver::new();
    assert_eq!(
        promise_value_type(&solver, lower(&solver, "Promise<string>")),
        Some(TypeId::STRING)
    );
    assert_eq!(
        promise_value_type(&solver, lower(&solver, "PromiseLike<1>")),
        Some(solver.interner().literal_number(1.0))
    );
    assert_eq!(promise_value_type(&solver, TypeId::NUMBER), None);
}
