use super::*;
use crate::lower::{TypeEnv, declare_source, lower_type_source};

fn lower(solver: &Solver, source: &str) -> TypeId {
    lower_type_source(solver, &TypeEnv::new(), source).unwrap()
}

fn names(solver: &Solver, set: &KeySet) -> Vec<String> {
    let mut out: Vec<String> = set.iter().map(|k| solver.interner().resolve_atom(k)).collect();
    out.sort();
    out
}

#[test]
fn test_required_optional_readonly_keys() {
    let solver = Solver::new();
    let t = lower(
        &solver,
        "{ a: string; b?: number; readonly c: boolean; readonly d?: 1; e: string | undefined }",
    );
    let required = required_keys(&solver, t);
    let optional = optional_keys(&solver, t);
    assert_eq!(names(&solver, &required), ["a", "c", "e"]);
    assert_eq!(names(&solver, &optional), ["b", "d"]);
    assert_eq!(names(&solver, &readonly_keys(&solver, t)), ["c", "d"]);

    assert!(required.intersection(&optional).is_empty());
    assert_eq!(required.union(&optional), all_keys(&solver, t));
}

#[test]
fn test_keys_resolve_through_named_and_intersection_types() {
    let solver = Solver::new();
    let mut env = TypeEnv::new();
    declare_source(&solver, &mut env, "interface A { a?: string }").unwrap();
    let t = lower_type_source(&solver, &env, "A & { readonly b: number }").unwrap();
    assert_eq!(names(&solver, &optional_keys(&solver, t)), ["a"]);
    assert_eq!(names(&solver, &required_keys(&solver, t)), ["b"]);
    assert_eq!(names(&solver, &readonly_keys(&solver, t)), ["b"]);
}

#[test]
fn test_useful_keys() {
    let solver = Solver::new();
    let interner = solver.interner();
    let tuple = lower(&solver, "[string, number?]");
    let keys: Vec<String> = useful_keys(&solver, tuple)
        .into_iter()
        .map(|k| interner.resolve_atom(k))
        .collect();
    assert_eq!(keys, ["0", "1"]);

    assert!(useful_keys(&solver, lower(&solver, "string[]")).is_empty());
    assert!(useful_keys(&solver, TypeId::STRING).is_empty());
    assert_eq!(useful_keys(&solver, lower(&solver, "{ x: 1; y: 2 }")).len(), 2);
}

#[test]
fn test_key_set_operations() {
    let set: KeySet = [Atom(3), Atom(1), Atom(3)].into_iter().collect();
    assert_eq!(set.len(), 2);
    assert!(set.contains(Atom(1)));
    let other: KeySet = [Atom(1)].into_iter().collect();
    assert!(other.is_subset(&set));
    assert!(!set.is_subset(&other));
    assert_eq!(set.difference(&other).iter().collect::<Vec<_>>(), [Atom(3)]);
}

#[test]
fn test_key_set_as_type() {
    let solver = Solver::new();
    let t = lower(&solver, "{ a: 1; b?: 2 }");
    assert_eq!(
        required_keys(&solver, t).to_type(&solver),
        solver.interner().literal_string("a")
    );
    assert_eq!(KeySet::new().to_type(&solver), TypeId::NEVER);
}
