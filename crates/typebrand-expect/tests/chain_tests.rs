use super::*;
use serde_json::json;

fn session() -> TypeSession {
    TypeSession::new()
}

fn chain<'s>(session: &'s TypeSession, source: &str) -> ExpectTypeOf<'s, Positive> {
    expect_type_of_source(session, source).unwrap()
}

#[test]
fn test_value_subjects_are_widened() {
    let session = session();
    let one = expect_type_of_value(&session, &json!({ "a": 1 }));
    assert!(one.to_equal_type_of("{ a: number }").is_ok());

    let two = expect_type_of_value(&session, &json!({ "a": 1, "b": 1 }));
    let err = two.to_equal_type_of("{ a: number }").unwrap_err();
    assert_eq!(err.kind, FailureKind::Mismatch);
    assert!(two.to_match_type_of("{ a: number }").is_ok());
    assert!(two.to_extend(&json!({ "a": 5 })).is_ok());
}

#[test]
fn test_equivalent_entry_points() {
    let session = session();
    let from_source = chain(&session, "{ a: number }");
    let from_value = expect_type_of_value(&session, &json!({ "a": 0 }));
    let explicit = expect_type_of(&session, session.lower("{ a: number }").unwrap());
    assert_eq!(from_source.subject(), from_value.subject());
    assert_eq!(from_source.subject(), explicit.subject());
}

#[test]
fn test_negation() {
    let session = session();
    let subject = chain(&session, "{ a: number }");
    assert!(subject.is_positive());
    let negated = subject.not();
    assert!(!negated.is_positive());
    assert!(negated.to_equal_type_of("{ a: string }").is_ok());
    let err = negated.to_equal_type_of("{ a: number }").unwrap_err();
    assert_eq!(err.kind, FailureKind::Negated);
    assert!(err.mismatch.is_none());
    assert!(negated.to_extend("{ b: number }").is_ok());
    assert!(negated.to_extend("{}").is_err());
}

#[test]
fn test_readonly_extends_but_is_not_equal() {
    let session = session();
    let subject = chain(&session, "{ readonly a: string }");
    assert!(subject.to_extend("{ a: string }").is_ok());
    assert!(subject.to_equal_type_of("{ a: string }").is_err());
    assert!(subject.to_equal_type_of("{ readonly a: string }").is_ok());
}

#[test]
fn test_branded_mode_catches_nested_any() {
    let session = session();
    let subject = chain(&session, "{ deeply: { nested: any } }").branded();
    assert!(subject.is_branded());
    assert!(
        subject
            .to_equal_type_of("{ deeply: { nested: unknown } }")
            .is_err()
    );
    assert!(subject.to_equal_type_of("{ deeply: { nested: any } }").is_ok());
    assert!(subject.not().is_branded());
}

#[test]
fn test_function_accessors() {
    let session = session();
    let f = chain(&session, "(a: number, b?: string) => boolean");
    assert!(f.parameter(0).to_equal_type_of("number").is_ok());
    assert!(f.parameter(1).to_equal_type_of("string | undefined").is_ok());
    assert!(f.parameters().to_equal_type_of("[a: number, b?: string]").is_ok());
    assert!(f.returns().to_be_boolean().is_ok());
    assert!(f.this_parameter().to_be_unknown().is_ok());
    assert!(f.parameter(2).is_vacuous());
}

#[test]
fn test_overloaded_accessors_cover_every_overload() {
    let session = session();
    let f = chain(&session, "{ (a: string): 1; (a: number, b: number): 2 }");
    assert!(f.returns().to_equal_type_of("1 | 2").is_ok());
    assert!(f.parameter(0).to_equal_type_of("string | number").is_ok());
    assert!(f.parameter(1).to_equal_type_of("number").is_ok());
    assert!(f.to_be_callable_with(&["\"x\""]).is_ok());
    assert!(f.to_be_callable_with(&["1", "2"]).is_ok());
    let err = f.to_be_callable_with(&["true"]).unwrap_err();
    assert_eq!(err.kind, FailureKind::Mismatch);
    assert!(f.not().to_be_callable_with(&["true"]).is_ok());
}

#[test]
fn test_constructor_accessors() {
    let session = session();
    let c = chain(&session, "new (a: number) => Date");
    assert!(c.instance().to_equal_type_of("Date").is_ok());
    assert!(c.constructor_parameters().to_equal_type_of("[a: number]").is_ok());
    assert!(c.to_be_constructible_with(&["1"]).is_ok());
    assert!(c.to_be_constructible_with(&["\"x\""]).is_err());
    assert!(c.returns().is_vacuous());
}

#[test]
fn test_promise_array_and_predicate_accessors() {
    let session = session();
    assert!(chain(&session, "Promise<string>").resolves().to_be_string().is_ok());
    assert!(chain(&session, "string[]").items().to_be_string().is_ok());
    assert!(
        chain(&session, "[1, \"a\"]")
            .items()
            .to_equal_type_of("1 | \"a\"")
            .is_ok()
    );
    assert!(
        chain(&session, "(this: Date) => void")
            .this_parameter()
            .to_equal_type_of("Date")
            .is_ok()
    );

    let guard = chain(&session, "(x: unknown) => x is string");
    assert!(guard.guards().to_be_string().is_ok());
    assert!(guard.asserts().is_vacuous());
    let assertion = chain(&session, "(x: unknown) => asserts x is number");
    assert!(assertion.asserts().to_be_number().is_ok());
    assert!(assertion.guards().is_vacuous());
}

#[test]
fn test_vacuous_chains_pass_everything() {
    let session = session();
    let vacuous = chain(&session, "string").returns();
    assert!(vacuous.is_vacuous());
    assert!(vacuous.to_equal_type_of("number").is_ok());
    assert!(vacuous.not().to_equal_type_of("never").is_ok());
    assert!(vacuous.to_be_any().is_ok());
    assert!(vacuous.parameters().items().is_vacuous());
}

#[test]
fn test_extract_and_exclude() {
    let session = session();
    let subject = chain(&session, "\"a\" | 1 | true");
    assert!(
        subject
            .extract("string")
            .unwrap()
            .to_equal_type_of("\"a\"")
            .is_ok()
    );
    assert!(
        subject
            .exclude("string")
            .unwrap()
            .to_equal_type_of("1 | true")
            .is_ok()
    );
    let err = subject.extract("Missing").unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidType);
}

#[test]
fn test_to_have_property() {
    let session = session();
    let subject = chain(&session, "{ a: { b: number }; c?: string }");
    let b = subject
        .to_have_property("a")
        .unwrap()
        .to_have_property("b")
        .unwrap();
    assert!(b.to_be_number().is_ok());
    assert!(
        subject
            .to_have_property("c")
            .unwrap()
            .to_equal_type_of("string | undefined")
            .is_ok()
    );
    assert_eq!(
        subject.to_have_property("d").unwrap_err().kind,
        FailureKind::Mismatch
    );
    assert!(subject.not().to_have_property("d").is_ok());
    assert!(subject.not().to_have_property("a").is_err());
    assert!(chain(&session, "string").to_have_property("a").unwrap().is_vacuous());
}

#[test]
fn test_kind_terminals() {
    let session = session();
    assert!(chain(&session, "any").to_be_any().is_ok());
    assert!(chain(&session, "unknown").to_be_any().is_err());
    assert!(chain(&session, "unknown").to_be_unknown().is_ok());
    assert!(chain(&session, "never").to_be_never().is_ok());
    assert!(chain(&session, "() => void").to_be_function().is_ok());
    assert!(chain(&session, "{ a: 1 }").to_be_object().is_ok());
    assert!(chain(&session, "string").to_be_object().is_err());
    assert!(chain(&session, "string[]").to_be_array().is_ok());
    assert!(chain(&session, "\"a\"").to_be_string().is_ok());
    assert!(chain(&session, "1").to_be_number().is_ok());
    assert!(chain(&session, "undefined").to_be_void().is_ok());
    assert!(chain(&session, "null").to_be_null().is_ok());
    assert!(chain(&session, "undefined").to_be_undefined().is_ok());
    assert!(chain(&session, "symbol").to_be_symbol().is_ok());
    assert!(chain(&session, "10n").to_be_bigint().is_ok());
    assert!(chain(&session, "string | null").to_be_nullable().is_ok());
    assert!(chain(&session, "string").to_be_nullable().is_err());
    assert!(chain(&session, "string").not().to_be_number().is_ok());
    assert_eq!(
        chain(&session, "string").not().to_be_string().unwrap_err().kind,
        FailureKind::Negated
    );

    let err = chain(&session, "1").to_be_string().unwrap_err();
    assert_eq!(
        err.mismatch,
        Some(MismatchReport::Message(
            "Expected: string, Actual: literal number: 1".to_string()
        ))
    );
}

#[test]
fn test_to_match_object_type() {
    let session = session();
    let subject = chain(&session, "{ a: 1; b: { c: 2; d: 3 } }");
    assert!(subject.to_match_object_type("{ b: { c: 2 } }").is_ok());
    assert!(subject.to_match_object_type("{ a: 1 }").is_ok());
    assert!(subject.to_match_object_type("{ b: { c: 3 } }").is_err());
    assert!(subject.to_match_object_type("{ e: 1 }").is_err());
    assert!(subject.not().to_match_object_type("{ a: 2 }").is_ok());
    assert_eq!(
        subject.to_match_object_type("string").unwrap_err().kind,
        FailureKind::InvalidType
    );
}

#[test]
fn test_unresolvable_arguments_fail() {
    let session = session();
    let err = chain(&session, "string").to_equal_type_of("Missing").unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidType);
    assert!(err.message.contains("Missing"));
}

#[test]
fn test_branded_extension_allows_width_and_readonly() {
    let session = session();
    let wide = chain(&session, "{ a: 1; b: 1 }").branded();
    assert!(wide.to_extend("{ a: number }").is_ok());
    assert!(wide.to_match_type_of("{ a: number }").is_ok());
    assert!(wide.to_extend("{ a: string }").is_err());
    assert!(wide.to_extend("{ c: number }").is_err());

    let readonly = chain(&session, "{ readonly a: string }").branded();
    assert!(readonly.to_extend("{ a: string }").is_ok());
    assert!(readonly.to_equal_type_of("{ a: string }").is_err());

    let required = chain(&session, "{ a: string }").branded();
    assert!(required.to_extend("{ a?: string }").is_ok());
    assert!(chain(&session, "{ a?: string }").branded().to_extend("{ a: string }").is_err());
}

#[test]
fn test_branded_extension_keeps_special_types_apart() {
    let session = session();
    let any = chain(&session, "{ a: any; b: 1 }");
    assert!(any.to_extend("{ a: unknown }").is_ok());
    let err = any.branded().to_extend("{ a: unknown }").unwrap_err();
    assert_eq!(err.kind, FailureKind::Mismatch);
    assert!(any.branded().to_match_type_of("{ a: any }").is_ok());
    assert!(any.branded().not().to_extend("{ a: unknown }").is_ok());
}

#[test]
fn test_branded_extension_of_functions() {
    let session = session();
    let augmented = chain(&session, "{ (a: number): string; foo: \"bar\" }").branded();
    assert!(augmented.to_extend("(a: number) => string").is_ok());
    assert!(augmented.to_extend("{ foo: string }").is_ok());
    assert!(augmented.to_extend("(a: number) => number").is_err());
    assert!(
        chain(&session, "[1, 2]")
            .branded()
            .to_extend("number[]")
            .is_ok()
    );
}
