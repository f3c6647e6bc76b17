use super::*;

fn lower(solver: &Solver, source: &str) -> TypeId {
    lower_type_source(solver, &TypeEnv::new(), source).expect("type should lower")
}

#[test]
fn test_lower_keywords_and_literals() {
    let solver = Solver::new();
    let interner = solver.interner();
    assert_eq!(lower(&solver, "string"), TypeId::STRING);
    assert_eq!(lower(&solver, "(never)"), TypeId::NEVER);
    assert_eq!(lower(&solver, "\"a\""), interner.literal_string("a"));
    assert_eq!(lower(&solver, "-10n"), interner.literal_bigint(true, "10"));
    assert_eq!(lower(&solver, "true | false"), TypeId::BOOLEAN);
    assert_eq!(
        lower(&solver, "1 | 2"),
        interner.union(vec![interner.literal_number(1.0), interner.literal_number(2.0)])
    );
}

#[test]
fn test_declarations_resolve_in_any_order() {
    let solver = Solver::new();
    let mut env = TypeEnv::new();
    let names = declare_source(&solver, &mut env, "type A = B[]; type B = string;").unwrap();
    assert_eq!(names, vec!["A".to_string(), "B".to_string()]);
    assert_eq!(
        env.lookup_type("A"),
        Some(solver.interner().array(TypeId::STRING))
    );
    assert_eq!(env.lookup_type("B"), Some(TypeId::STRING));
}

#[test]
fn test_circular_alias_is_reported() {
    let solver = Solver::new();
    let mut env = TypeEnv::new();
    let err = declare_source(&solver, &mut env, "type A = B; type B = A;").unwrap_err();
    assert_eq!(err.code(), CIRCULAR_REFERENCE);
    assert!(env.lookup_type("A").is_none());

    let err = declare_source(
        &solver,
        &mut env,
        "interface ListNode { next: ListNode | null }",
    )
    .unwrap_err();
    assert_eq!(err.code(), CIRCULAR_REFERENCE);
}

#[test]
fn test_unknown_name_and_parse_errors() {
    let solver = Solver::new();
    let env = TypeEnv::new();
    let err = lower_type_source(&solver, &env, "Missing").unwrap_err();
    assert_eq!(err.code(), CANNOT_FIND_NAME);
    assert!(err.to_string().contains("Cannot find name 'Missing'."));

    let err = lower_type_source(&solver, &env, "{ a: }").unwrap_err();
    assert!(matches!(err, LowerError::Parse(_)));
}

#[test]
fn test_generic_arity_is_checked() {
    let solver = Solver::new();
    let env = TypeEnv::new();
    let err = lower_type_source(&solver, &env, "Array<string, number>").unwrap_err();
    assert_eq!(err.code(), GENERIC_ARITY);
    assert_eq!(
        lower(&solver, "Array<string>"),
        solver.interner().array(TypeId::STRING)
    );
    assert_eq!(
        lower(&solver, "ReadonlyArray<string>"),
        lower(&solver, "readonly string[]")
    );
}

#[test]
fn test_repeated_function_declarations_form_overloads() {
    let solver = Solver::new();
    let mut env = TypeEnv::new();
    declare_source(
        &solver,
        &mut env,
        "declare function f(a: 1): 1;\ndeclare function f(a: string): string;",
    )
    .unwrap();
    let f = env.lookup_value("f").unwrap();
    let interner = solver.interner();
    let Some(TypeKey::Callable(shape_id)) = interner.lookup(f) else {
        panic!("expected a callable");
    };
    let shape = interner.callable_shape(shape_id);
    assert_eq!(shape.call_signatures.len(), 2);
    assert_eq!(
        shape.call_signatures[0].return_type,
        interner.literal_number(1.0)
    );
    assert_eq!(shape.call_signatures[1].return_type, TypeId::STRING);
}

#[test]
fn test_unique_symbols_are_distinct() {
    let solver = Solver::new();
    let mut env = TypeEnv::new();
    declare_source(
        &solver,
        &mut env,
        "declare const a: unique symbol; declare const b: unique symbol;",
    )
    .unwrap();
    let a = env.lookup_value("a").unwrap();
    let b = env.lookup_value("b").unwrap();
    assert_ne!(a, b);
    assert_eq!(lower_type_source(&solver, &env, "typeof a").unwrap(), a);

    let err = lower_type_source(&solver, &env, "unique symbol").unwrap_err();
    assert_eq!(err.code(), UNIQUE_SYMBOL_NOT_ALLOWED);
}

#[test]
fn test_typeof_reads_property_paths() {
    let solver = Solver::new();
    let mut env = TypeEnv::new();
    declare_source(&solver, &mut env, "declare const o: { a: { b: number } };").unwrap();
    assert_eq!(
        lower_type_source(&solver, &env, "typeof o.a.b").unwrap(),
        TypeId::NUMBER
    );
    let err = lower_type_source(&solver, &env, "typeof o.c").unwrap_err();
    assert_eq!(err.code(), CANNOT_FIND_NAME);
}

#[test]
fn test_duplicate_declarations_are_rejected() {
    let solver = Solver::new();
    let mut env = TypeEnv::new();
    declare_source(&solver, &mut env, "type A = string;").unwrap();
    let err = declare_source(&solver, &mut env, "type A = number;").unwrap_err();
    assert_eq!(err.code(), DUPLICATE_IDENTIFIER);
    assert_eq!(env.lookup_type("A"), Some(TypeId::STRING));
}

#[test]
fn test_readonly_requires_array_or_tuple() {
    let solver = Solver::new();
    let env = TypeEnv::new();
    let err = lower_type_source(&solver, &env, "readonly string").unwrap_err();
    assert_eq!(err.code(), READONLY_MODIFIER_NOT_ALLOWED);
}

#[test]
fn test_index_signature_key_must_be_string_or_number() {
    let solver = Solver::new();
    let env = TypeEnv::new();
    let err = lower_type_source(&solver, &env, "{ [k: boolean]: string }").unwrap_err();
    assert_eq!(err.code(), INVALID_INDEX_KEY);
}

#[test]
fn test_rest_tuple_parameter_expands() {
    let solver = Solver::new();
    let f = lower(&solver, "(...args: [a: string, b?: number]) => void");
    let interner = solver.interner();
    let Some(TypeKey::Function(shape_id)) = interner.lookup(f) else {
        panic!("expected a function");
    };
    let shape = interner.function_shape(shape_id);
    let params = &shape.signature.params;
    assert_eq!(params.len(), 2);
    assert_eq!(params[0].type_id, TypeId::STRING);
    assert!(!params[0].optional);
    assert!(params[1].optional);
    assert_eq!(shape.signature.min_argument_count(), 1);
}

#[test]
fn test_type_predicates_lower_to_boolean_and_void() {
    let solver = Solver::new();
    let interner = solver.interner();
    let guard = lower(&solver, "(x: unknown) => x is string");
    let Some(TypeKey::Function(shape_id)) = interner.lookup(guard) else {
        panic!("expected a function");
    };
    let signature = &interner.function_shape(shape_id).signature;
    assert_eq!(signature.return_type, TypeId::BOOLEAN);
    assert_eq!(
        signature.type_predicate,
        Some(TypePredicate {
            asserts: false,
            target: PredicateTarget::Param(0),
            type_id: Some(TypeId::STRING),
        })
    );

    let assertion = lower(&solver, "(x: unknown) => asserts x");
    let Some(TypeKey::Function(shape_id)) = interner.lookup(assertion) else {
        panic!("expected a function");
    };
    assert_eq!(
        interner.function_shape(shape_id).signature.return_type,
        TypeId::VOID
    );
}

#[test]
fn test_interface_extends_merges_members() {
    let solver = Solver::new();
    let mut env = TypeEnv::new();
    declare_source(
        &solver,
        &mut env,
        "interface A { a: string; b: number }\ninterface B extends A { b: 1; c: boolean }",
    )
    .unwrap();
    let b = env.lookup_type("B").unwrap();
    let interner = solver.interner();
    assert!(matches!(interner.lookup(b), Some(TypeKey::Named(_))));
    let members = structure::members_of(&solver, b).unwrap();
    assert_eq!(members.properties.len(), 3);
    let b_prop = members.property(interner.intern_string("b")).unwrap();
    assert_eq!(b_prop.type_id, interner.literal_number(1.0));
}

#[test]
fn test_methods_with_the_same_name_overload() {
    let solver = Solver::new();
    let t = lower(&solver, "{ m(a: string): string; m(a: number): number }");
    let interner = solver.interner();
    let members = structure::members_of(&solver, t).unwrap();
    let m = members.property(interner.intern_string("m")).unwrap();
    assert_eq!(structure::call_signatures(&solver, m.type_id).len(), 2);
}

#[test]
fn test_library_utility_types() {
    let solver = Solver::new();
    assert_eq!(
        lower(&solver, "Pick<{ a: string; b: number }, \"a\">"),
        lower(&solver, "{ a: string }")
    );
    assert_eq!(
        lower(&solver, "Omit<{ a: string; b: number }, \"a\">"),
        lower(&solver, "{ b: number }")
    );
    assert_eq!(
        lower(&solver, "Partial<{ a: string }>"),
        lower(&solver, "{ a?: string }")
    );
    assert_eq!(
        lower(&solver, "Exclude<\"a\" | \"b\", \"a\">"),
        lower(&solver, "\"b\"")
    );
    assert_eq!(
        lower(&solver, "ReturnType<(a: string) => number>"),
        TypeId::NUMBER
    );
    assert_eq!(
        lower(&solver, "Parameters<(a: string) => number>"),
        lower(&solver, "[a: string]")
    );
    assert_eq!(lower(&solver, "Date"), solver.builtins().date);
    assert_eq!(
        lower(&solver, "PropertyKey"),
        lower(&solver, "string | number | symbol")
    );
}

#[test]
fn test_declared_type_names_are_not_generic() {
    let solver = Solver::new();
    let mut env = TypeEnv::new();
    declare_source(&solver, &mut env, "type A = string;").unwrap();
    let err = lower_type_source(&solver, &env, "A<number>").unwrap_err();
    assert_eq!(err.code(), NOT_GENERIC);
}
