use super::*;
use serde_json::json;
use typebrand_solver::{HostProfile, deep_brand};

#[test]
fn test_declare_and_lower() {
    let mut session = TypeSession::new();
    let names = session
        .declare("interface Point { x: number; y: number }\ntype Pair = [Point, Point];")
        .unwrap();
    assert_eq!(names, vec!["Point".to_string(), "Pair".to_string()]);
    let pair = session.lower("Pair").unwrap();
    assert_eq!(
        session.format(pair),
        "[{ x: number; y: number; }, { x: number; y: number; }]"
    );
    assert!(session.lower("Missing").is_err());
}

#[test]
fn test_value_types() {
    let session = TypeSession::new();
    let widened = session.value_type(&json!({ "a": 1 }));
    assert_eq!(session.format(widened), "{ a: number; }");
    let exact = session.const_value_type(&json!({ "a": 1 }));
    assert_eq!(session.format(exact), "{ readonly a: 1; }");
}

#[test]
fn test_with_options() {
    let options = ExpectOptions {
        host_profile: HostProfile::Legacy,
        ..ExpectOptions::default()
    };
    let session = TypeSession::with_options(options).unwrap();
    assert_eq!(session.solver().options().host_profile, HostProfile::Legacy);
    assert_eq!(session.solver().nominal_types().len(), 1);

    let mut broken = ExpectOptions::default();
    broken
        .nominal_types
        .insert("Nope".to_string(), "Missing".to_string());
    assert!(TypeSession::with_options(broken).is_err());
}

#[test]
fn test_register_nominal() {
    let mut session = TypeSession::new();
    session.declare("interface UserId { id: string }").unwrap();
    let user_id = session.lower("UserId").unwrap();
    assert_eq!(deep_brand(session.solver(), user_id).tag(), "object");

    session.register_nominal("UserId", "UserId").unwrap();
    assert_eq!(deep_brand(session.solver(), user_id).tag(), "nominal");
    assert_eq!(session.solver().nominal_types().len(), 2);
    assert_eq!(
        session.options().nominal_types.get("UserId").map(String::as_str),
        Some("UserId")
    );
    assert!(session.register_nominal("Other", "Missing").is_err());
}
