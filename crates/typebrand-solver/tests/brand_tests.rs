use super::*;
use crate::lower::{TypeEnv, declare_source, lower_type_source};
use crate::solver::SolverOptions;

fn lower(solver: &Solver, source: &str) -> TypeId {
    lower_type_source(solver, &TypeEnv::new(), source).unwrap()
}

fn brand_equal(solver: &Solver, left: &str, right: &str) -> bool {
    let l = deep_brand(solver, lower(solver, left));
    let r = deep_brand(solver, lower(solver, right));
    brand_extends(solver, &l, &r) && brand_extends(solver, &r, &l)
}

#[test]
fn test_brand_is_reflexive() {
    let solver = Solver::new();
    for source in [
        "any",
        "never",
        "{ a?: number; readonly b: string[] }",
        "(a: string) => void",
        "{ (a: 1): 1; (a: 2): 2 }",
        "new (x: number) => Date",
        "readonly [string, number?, ...boolean[]]",
        "\"a\" | 1 | null",
        "{ [k: string]: number }",
    ] {
        assert!(brand_equal(&solver, source, source), "{source}");
    }
}

#[test]
fn test_special_types_brand_apart() {
    let solver = Solver::new();
    let specials = ["any", "unknown", "never", "number"];
    for (i, left) in specials.iter().enumerate() {
        for (j, right) in specials.iter().enumerate() {
            assert_eq!(brand_equal(&solver, left, right), i == j, "{left} vs {right}");
        }
    }
    assert!(!brand_equal(
        &solver,
        "{ deeply: { nested: any } }",
        "{ deeply: { nested: unknown } }"
    ));
}

#[test]
fn test_optional_and_readonly_markers_are_kept() {
    let solver = Solver::new();
    assert!(!brand_equal(&solver, "{ a?: number }", "{ a: number | undefined }"));
    assert!(!brand_equal(&solver, "{ readonly a: string }", "{ a: string }"));
    assert!(!brand_equal(&solver, "readonly string[]", "string[]"));
    assert!(brand_equal(&solver, "{ a?: number }", "{ a?: number | undefined }"));
}

#[test]
fn test_primitive_brands_embed_the_value() {
    let solver = Solver::new();
    let one = deep_brand(&solver, lower(&solver, "1"));
    let number = deep_brand(&solver, TypeId::NUMBER);
    assert_eq!(*one, Brand::Primitive { value: lower(&solver, "1") });
    assert!(brand_extends(&solver, &one, &number));
    assert!(!brand_extends(&solver, &number, &one));
    assert!(!brand_equal(&solver, "{ a: 1 }", "{ a: number }"));
}

#[test]
fn test_constructor_parameter_names_are_irrelevant() {
    let solver = Solver::new();
    assert!(brand_equal(
        &solver,
        "new (a: 1) => { value: number }",
        "new (c: 1) => { value: number }"
    ));
    assert!(!brand_equal(
        &solver,
        "new (a: 1) => { value: number }",
        "new (b: 2) => { value: number }"
    ));
}

#[test]
fn test_function_own_properties_are_branded() {
    let solver = Solver::new();
    let augmented = "{ (a: number, b: number): number; foo: \"bar\" }";
    assert!(!brand_equal(&solver, augmented, "(a: number, b: number) => number"));
    assert!(brand_equal(
        &solver,
        augmented,
        "((x: number, y: number) => number) & { foo: \"bar\" }"
    ));
    assert!(matches!(
        *deep_brand(&solver, lower(&solver, augmented)),
        Brand::Function { .. }
    ));
}

#[test]
fn test_overloads_compare_in_order() {
    let solver = Solver::new();
    let brand = deep_brand(&solver, lower(&solver, "{ (a: string): 1; (a: number): 2 }"));
    let Brand::Overloads { overloads } = &*brand else {
        panic!("expected overloads, got {}", brand.tag());
    };
    assert_eq!(overloads.len(), 2);
    assert!(!brand_equal(
        &solver,
        "{ (a: string): 1; (a: number): 2 }",
        "{ (a: number): 2; (a: string): 1 }"
    ));
}

#[test]
fn test_nominal_registry_short_circuits() {
    let solver = Solver::new();
    let mut env = TypeEnv::new();
    declare_source(
        &solver,
        &mut env,
        "interface LikeDate { getTime(): number; toISOString(): string; valueOf(): number }",
    )
    .unwrap();
    let like = deep_brand(&solver, env.lookup_type("LikeDate").unwrap());
    assert_eq!(*like, Brand::Nominal { name: Arc::from("Date") });
    assert_eq!(
        *deep_brand(&solver, solver.builtins().date),
        Brand::Nominal { name: Arc::from("Date") }
    );
}

#[test]
fn test_tuple_and_array_brands() {
    let solver = Solver::new();
    assert!(!brand_equal(&solver, "[string, number?]", "[string, number]"));
    assert!(!brand_equal(&solver, "[string]", "string[]"));
    assert!(brand_equal(&solver, "Array<string>", "string[]"));
    let Brand::Tuple { items, readonly } = &*deep_brand(&solver, lower(&solver, "readonly [1, ...2[]]"))
    else {
        panic!("expected a tuple");
    };
    assert!(*readonly);
    assert!(items[1].rest);
}

#[test]
fn test_unions_distribute() {
    let solver = Solver::new();
    assert!(brand_equal(&solver, "string | { a?: 1 }", "{ a?: 1 } | string"));
    assert!(!brand_equal(&solver, "string | { a?: 1 }", "string | { a: 1 | undefined }"));
    let Brand::Union { members } = &*deep_brand(&solver, lower(&solver, "string | undefined")) else {
        panic!("expected a union");
    };
    assert_eq!(members.len(), 2);
}

#[test]
fn test_brands_are_cached() {
    let solver = Solver::new();
    let t = lower(&solver, "{ a: { b: string } }");
    let first = deep_brand(&solver, t);
    let second = deep_brand(&solver, t);
    assert!(Arc::ptr_eq(&first, &second));
    assert!(solver.cache().brand_len() >= 3);
}

#[test]
fn test_depth_limit_truncates_to_unknown() {
    let solver = Solver::with_options(SolverOptions {
        brand_depth_limit: 2,
        ..SolverOptions::default()
    });
    let t = lower(&solver, "{ a: { b: { c: string } } }");
    let mut brander = Brander::new(&solver);
    let brand = brander.brand(t);
    assert!(brander.is_truncated());
    let Brand::Object(outer) = &*brand else {
        panic!("expected an object");
    };
    let a = outer.property(solver.interner().intern_string("a")).unwrap();
    let Brand::Object(inner) = &**a else {
        panic!("expected an object");
    };
    let b = inner.property(solver.interner().intern_string("b")).unwrap();
    assert_eq!(**b, Brand::Unknown);
    assert!(solver.cache().brand(t).is_none());
}
