//! End-to-end assertions through the public chain.

use serde_json::json;
use typebrand::solver::overloads::overloads_info;
use typebrand::solver::{
    brand_extends, deep_brand, extends, strict_equal_using_branding,
    strict_equal_using_internal_identity,
};
use typebrand::{FailureKind, TypeId, TypeSession, expect_type_of_source, expect_type_of_value};

fn session() -> TypeSession {
    typebrand::tracing_config::init_tracing();
    TypeSession::new()
}

#[test]
fn test_value_equality_and_matching() {
    let session = session();
    let a = expect_type_of_value(&session, &json!({ "a": 1 }));
    assert!(a.to_equal_type_of("{ a: number }").is_ok());

    let ab = expect_type_of_value(&session, &json!({ "a": 1, "b": 1 }));
    let err = ab.to_equal_type_of("{ a: number }").unwrap_err();
    assert_eq!(err.kind, FailureKind::Mismatch);
    assert!(err.to_string().contains("at .b: Expected: never, Actual: number"));
    assert!(ab.to_match_type_of("{ a: number }").is_ok());
    assert!(ab.to_extend(&json!({ "a": 2 })).is_ok());
    assert!(ab.branded().to_extend("{ a: number }").is_ok());
    assert!(ab.branded().to_match_type_of("{ a: number }").is_ok());
}

#[test]
fn test_optional_is_not_undefined() {
    let session = session();
    let optional = expect_type_of_source(&session, "{ a?: number }").unwrap();
    assert!(optional.to_equal_type_of("{ a: number | undefined }").is_err());
    assert!(optional.branded().to_equal_type_of("{ a: number | undefined }").is_err());
    assert!(optional.to_equal_type_of("{ a?: number }").is_ok());
}

#[test]
fn test_readonly_extends_without_being_equal() {
    let session = session();
    let readonly = expect_type_of_source(&session, "{ readonly a: string }").unwrap();
    assert!(readonly.to_extend("{ a: string }").is_ok());
    assert!(readonly.branded().to_extend("{ a: string }").is_ok());
    assert!(readonly.to_equal_type_of("{ a: string }").is_err());
    assert!(readonly.branded().to_equal_type_of("{ a: string }").is_err());
}

#[test]
fn test_nested_any_needs_branding() {
    let session = session();
    let solver = session.solver();
    let any = session.lower("{ deeply: { nested: any } }").unwrap();
    let unknown = session.lower("{ deeply: { nested: unknown } }").unwrap();
    assert!(strict_equal_using_internal_identity(solver, any, unknown));
    assert!(!strict_equal_using_branding(solver, any, unknown));

    let subject = expect_type_of_source(&session, "{ deeply: { nested: any } }").unwrap();
    assert!(subject.branded().to_equal_type_of(unknown).is_err());
    assert!(subject.to_extend(unknown).is_ok());
    assert!(subject.branded().to_extend(unknown).is_err());
}

#[test]
fn test_special_types_are_pairwise_unequal() {
    let session = session();
    let solver = session.solver();
    let specials = [TypeId::ANY, TypeId::UNKNOWN, TypeId::NEVER, TypeId::NUMBER];
    for (i, &left) in specials.iter().enumerate() {
        for (j, &right) in specials.iter().enumerate() {
            assert_eq!(
                strict_equal_using_branding(solver, left, right),
                i == j,
                "{} vs {}",
                session.format(left),
                session.format(right)
            );
        }
    }
}

#[test]
fn test_never_only_extends_never() {
    let session = session();
    let solver = session.solver();
    assert!(extends(solver, TypeId::NEVER, TypeId::NEVER));
    assert!(!extends(solver, TypeId::NEVER, TypeId::NUMBER));
    assert!(!extends(solver, TypeId::NUMBER, TypeId::NEVER));
}

#[test]
fn test_single_overload_extraction() {
    let session = session();
    let f = session.lower("(a: number) => number[]").unwrap();
    let infos = overloads_info(session.solver(), f);
    assert_eq!(infos.len(), 1);
    assert_eq!(infos[0].parameters, session.lower("[a: number]").unwrap());
    assert_eq!(infos[0].return_type, session.lower("number[]").unwrap());
}

#[test]
fn test_constructor_parameter_names_are_irrelevant() {
    let session = session();
    let subject = expect_type_of_source(&session, "new (a: 1) => { value: number }").unwrap();
    assert!(subject.to_equal_type_of("new (c: 1) => { value: number }").is_ok());
    assert!(subject.to_equal_type_of("new (b: 2) => { value: number }").is_err());
    assert!(
        subject
            .branded()
            .to_equal_type_of("new (c: 1) => { value: number }")
            .is_ok()
    );
}

#[test]
fn test_function_own_properties_are_compared() {
    let mut session = session();
    session
        .declare(
            "declare const add: { (a: number, b: number): number; foo: \"bar\" };\n\
             declare const plain: (a: number, b: number) => number;",
        )
        .unwrap();
    let solver = session.solver();
    let add = session.lower("typeof add").unwrap();
    let plain = session.lower("typeof plain").unwrap();
    assert_ne!(deep_brand(solver, add), deep_brand(solver, plain));

    let subject = expect_type_of_source(&session, "typeof add").unwrap();
    assert!(subject.to_equal_type_of("typeof plain").is_err());
    assert!(
        subject
            .to_equal_type_of("{ (x: number, y: number): number; foo: \"bar\" }")
            .is_ok()
    );
    assert!(subject.to_extend("typeof plain").is_ok());
}

#[test]
fn test_branding_is_reflexive_and_symmetric() {
    let session = session();
    let solver = session.solver();
    let sources = [
        "string",
        "{ a?: number }",
        "{ readonly a: string[] }",
        "(a: number) => void",
        "{ (a: 1): 1; (a: 2): 2 }",
        "[1, ...string[]]",
        "Date",
        "Promise<{ x: any }>",
    ];
    let types: Vec<TypeId> = sources.iter().map(|s| session.lower(s).unwrap()).collect();
    for &left in &types {
        let brand = deep_brand(solver, left);
        assert!(brand_extends(solver, &brand, &brand));
        for &right in &types {
            assert_eq!(
                strict_equal_using_branding(solver, left, right),
                strict_equal_using_branding(solver, right, left)
            );
        }
    }
}

#[test]
fn test_vacuous_accessors_pass() {
    let session = session();
    let subject = expect_type_of_source(&session, "string").unwrap();
    let returns = subject.returns();
    assert!(returns.is_vacuous());
    assert!(returns.to_equal_type_of("number").is_ok());
    assert!(returns.not().to_equal_type_of("number").is_ok());
}

#[test]
fn test_forced_fast_strategy_on_legacy_host_still_sees_signatures() {
    let options = typebrand::ExpectOptions {
        host_profile: typebrand::solver::HostProfile::Legacy,
        overload_strategy: typebrand::solver::OverloadStrategyChoice::Fast,
        ..typebrand::ExpectOptions::default()
    };
    let session = TypeSession::with_options(options).unwrap();
    let f = expect_type_of_source(&session, "(a: number) => string").unwrap();
    assert!(f.returns().to_equal_type_of("string").is_ok());
    assert!(f.returns().to_equal_type_of("boolean").is_err());
    assert!(
        f.branded()
            .to_equal_type_of("(a: boolean) => number")
            .is_err()
    );
}
