use super::*;
use crate::lower::{TypeEnv, lower_type_source};

fn lower(solver: &Solver, source: &str) -> TypeId {
    lower_type_source(solver, &TypeEnv::new(), source).unwrap()
}

#[test]
fn test_tuple_members_expose_indices_and_length() {
    let solver = Solver::new();
    let interner = solver.interner();
    let fixed = members_of(&solver, lower(&solver, "[string, number]")).unwrap();
    let names: Vec<String> = fixed
        .properties
        .iter()
        .map(|p| interner.resolve_atom(p.name))
        .collect();
    assert_eq!(names, ["0", "1", "length"]);
    let length = fixed.property(interner.intern_string("length")).unwrap();
    assert_eq!(length.type_id, interner.literal_number(2.0));

    let open = members_of(&solver, lower(&solver, "[string, number?]")).unwrap();
    let length = open.property(interner.intern_string("length")).unwrap();
    assert_eq!(length.type_id, TypeId::NUMBER);
}

#[test]
fn test_named_types_resolve_to_their_bodies() {
    let solver = Solver::new();
    let date = solver.builtins().date;
    assert_ne!(apparent_type(&solver, date), date);
    let members = members_of(&solver, date).unwrap();
    assert!(
        members
            .property(solver.interner().intern_string("getTime"))
            .is_some()
    );
}

#[test]
fn test_intersection_members_merge() {
    let solver = Solver::new();
    let members = members_of(&solver, lower(&solver, "{ a: string } & { b: number }")).unwrap();
    assert_eq!(members.properties.len(), 2);
}

#[test]
fn test_property_read_type() {
    let solver = Solver::new();
    let interner = solver.interner();
    let a = interner.intern_string("a");
    let optional = lower(&solver, "{ a?: string }");
    assert_eq!(
        property_read_type(&solver, optional, a),
        Some(interner.union2(TypeId::STRING, TypeId::UNDEFINED))
    );
    let indexed = lower(&solver, "{ [k: string]: number }");
    assert_eq!(property_read_type(&solver, indexed, a), Some(TypeId::NUMBER));
    assert_eq!(property_read_type(&solver, lower(&solver, "{}"), a), None);
    assert_eq!(property_read_type(&solver, TypeId::STRING, a), None);
}

#[test]
fn test_array_helpers() {
    let solver = Solver::new();
    let readonly = lower(&solver, "readonly string[]");
    assert_eq!(array_element_type(&solver, readonly), Some(TypeId::STRING));
    assert!(is_readonly_array_like(&solver, readonly));
    assert!(!is_readonly_array_like(&solver, lower(&solver, "string[]")));
    assert!(is_array_like(&solver, lower(&solver, "[1]")));
    assert!(!is_array_like(&solver, lower(&solver, "{ length: number }")));
    assert_eq!(
        rest_element_type(&solver, lower(&solver, "number[]")),
        TypeId::NUMBER
    );
}

#[test]
fn test_numeric_names_and_primitives() {
    assert!(is_numeric_name("0"));
    assert!(is_numeric_name("1.5"));
    assert!(!is_numeric_name("01"));
    assert!(!is_numeric_name("a"));

    let solver = Solver::new();
    assert!(is_primitive(&solver, TypeId::STRING));
    assert!(is_primitive(&solver, lower(&solver, "\"a\"")));
    assert!(!is_primitive(&solver, lower(&solver, "{ a: 1 }")));
    assert!(!is_primitive(&solver, TypeId::ANY));
}
