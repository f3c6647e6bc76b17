use super::*;
use crate::ast::*;

fn parse_ok(source: &str) -> TypeNode {
    match parse_type(source) {
        Ok(node) => node,
        Err(err) => panic!("failed to parse {source:?}: {err}"),
    }
}

fn first_code(source: &str) -> u32 {
    let err = parse_type(source).expect_err("expected a parse error");
    err.first().map(|d| d.code).unwrap_or(0)
}

#[test]
fn test_parse_keyword_and_literals() {
    assert!(matches!(
        parse_ok("string").kind,
        TypeNodeKind::Keyword(KeywordType::String)
    ));
    assert_eq!(
        parse_ok("'a'").kind,
        TypeNodeKind::StringLiteral("a".to_string())
    );
    assert_eq!(parse_ok("-1.5").kind, TypeNodeKind::NumberLiteral(-1.5));
    assert_eq!(
        parse_ok("-10n").kind,
        TypeNodeKind::BigIntLiteral {
            negative: true,
            digits: "10".to_string()
        }
    );
    assert_eq!(parse_ok("true").kind, TypeNodeKind::BooleanLiteral(true));
}

#[test]
fn test_parse_union_with_leading_bar_and_arrays() {
    let node = parse_ok("| string[][] | number");
    let TypeNodeKind::Union(members) = node.kind else {
        panic!("expected union");
    };
    assert_eq!(members.len(), 2);
    let TypeNodeKind::Array(inner) = &members[0].kind else {
        panic!("expected array");
    };
    assert!(matches!(inner.kind, TypeNodeKind::Array(_)));
}

#[test]
fn test_intersection_binds_tighter_than_union() {
    let node = parse_ok("A & B | C");
    let TypeNodeKind::Union(members) = node.kind else {
        panic!("expected union");
    };
    assert!(matches!(members[0].kind, TypeNodeKind::Intersection(_)));
}

#[test]
fn test_parse_function_type_with_this_and_rest() {
    let node = parse_ok("(this: Window, a: number, b?: string, ...rest: boolean[]) => void");
    let TypeNodeKind::Function(signature) = node.kind else {
        panic!("expected function type");
    };
    assert!(signature.this_param.is_some());
    assert_eq!(signature.params.len(), 3);
    assert!(signature.params[1].optional);
    assert!(signature.params[2].rest);
    assert!(matches!(
        signature.return_type,
        Some(ReturnTypeNode::Type(TypeNode {
            kind: TypeNodeKind::Keyword(KeywordType::Void),
            ..
        }))
    ));
}

#[test]
fn test_parenthesized_type_is_not_a_function() {
    let node = parse_ok("(string | number)[]");
    let TypeNodeKind::Array(inner) = node.kind else {
        panic!("expected array");
    };
    assert!(matches!(inner.kind, TypeNodeKind::Parenthesized(_)));
    assert!(matches!(
        inner.skip_parens().kind,
        TypeNodeKind::Union(_)
    ));
}

#[test]
fn test_parse_constructor_type() {
    let node = parse_ok("new (a: 1) => { value: number }");
    let TypeNodeKind::Constructor {
        signature,
        is_abstract,
    } = node.kind
    else {
        panic!("expected constructor type");
    };
    assert!(!is_abstract);
    assert_eq!(signature.params[0].name, "a");
}

#[test]
fn test_parse_type_predicates() {
    let node = parse_ok("(x: unknown) => x is string");
    let TypeNodeKind::Function(signature) = node.kind else {
        panic!("expected function type");
    };
    let Some(ReturnTypeNode::Predicate(predicate)) = signature.return_type else {
        panic!("expected predicate");
    };
    assert!(!predicate.asserts);
    assert_eq!(predicate.target, PredicateTarget::Parameter("x".to_string()));

    let node = parse_ok("(x: unknown) => asserts x");
    let TypeNodeKind::Function(signature) = node.kind else {
        panic!("expected function type");
    };
    let Some(ReturnTypeNode::Predicate(predicate)) = signature.return_type else {
        panic!("expected predicate");
    };
    assert!(predicate.asserts);
    assert!(predicate.ty.is_none());
}

#[test]
fn test_parse_tuple_elements() {
    let node = parse_ok("readonly [a: string, b?: number, ...rest: boolean[]]");
    let TypeNodeKind::Readonly(inner) = node.kind else {
        panic!("expected readonly");
    };
    let TypeNodeKind::Tuple(elements) = &inner.kind else {
        panic!("expected tuple");
    };
    assert_eq!(elements.len(), 3);
    assert_eq!(elements[0].name.as_deref(), Some("a"));
    assert!(elements[1].optional);
    assert!(elements[2].rest);

    let node = parse_ok("[string, number?]");
    let TypeNodeKind::Tuple(elements) = node.kind else {
        panic!("expected tuple");
    };
    assert!(elements[1].optional);
    assert!(elements[1].name.is_none());
}

#[test]
fn test_parse_type_literal_members() {
    let node = parse_ok(
        "{ readonly a?: number; b: string, 'c-d': 1\n e(x: number): void; (): void; new (): {}; [k: string]: unknown; readonly: boolean; 1.0: 2 }",
    );
    let TypeNodeKind::TypeLiteral(members) = node.kind else {
        panic!("expected type literal");
    };
    assert_eq!(members.len(), 9);
    assert!(matches!(
        &members[0],
        MemberNode::Property { name, optional: true, readonly: true, .. } if name == "a"
    ));
    assert!(matches!(&members[2], MemberNode::Property { name, .. } if name == "c-d"));
    assert!(matches!(&members[3], MemberNode::Method { name, .. } if name == "e"));
    assert!(matches!(&members[4], MemberNode::Call(_)));
    assert!(matches!(&members[5], MemberNode::Construct(_)));
    assert!(matches!(&members[6], MemberNode::Index { .. }));
    assert!(matches!(
        &members[7],
        MemberNode::Property { name, readonly: false, .. } if name == "readonly"
    ));
    assert!(matches!(&members[8], MemberNode::Property { name, .. } if name == "1"));
}

#[test]
fn test_parse_reference_with_nested_arguments() {
    let node = parse_ok("Promise<Array<string>>");
    let TypeNodeKind::Reference { name, args } = node.kind else {
        panic!("expected reference");
    };
    assert_eq!(name, "Promise");
    assert!(matches!(
        &args[0].kind,
        TypeNodeKind::Reference { name, args } if name == "Array" && args.len() == 1
    ));
}

#[test]
fn test_unique_symbol_and_typeof() {
    assert_eq!(parse_ok("unique symbol").kind, TypeNodeKind::UniqueSymbol);
    assert_eq!(
        parse_ok("typeof a.b").kind,
        TypeNodeKind::TypeQuery {
            name: "a.b".to_string()
        }
    );
}

#[test]
fn test_spans_cover_source() {
    let source = "  { a: string }  ";
    let node = parse_ok(source);
    assert_eq!(node.span.slice(source), "{ a: string }");
}

#[test]
fn test_error_codes() {
    assert_eq!(first_code("string |"), diagnostic_codes::TYPE_EXPECTED);
    assert_eq!(first_code("[string"), diagnostic_codes::TOKEN_EXPECTED);
    assert_eq!(first_code("string number"), diagnostic_codes::TOKEN_EXPECTED);
    assert_eq!(first_code("'abc"), diagnostic_codes::UNTERMINATED_STRING_LITERAL);
    assert_eq!(first_code("#"), diagnostic_codes::INVALID_CHARACTER);
}

#[test]
fn test_error_display_mentions_code() {
    let err = parse_type("(a: ) => void").expect_err("expected a parse error");
    let text = err.to_string();
    assert!(text.starts_with("TS1110"), "{text}");
}

#[test]
fn test_nesting_limit() {
    let depth = typebrand_common::limits::MAX_PARSE_DEPTH as usize + 4;
    let source = format!("{}string{}", "(".repeat(depth), ")".repeat(depth));
    assert_eq!(first_code(&source), diagnostic_codes::NESTING_TOO_DEEP);
}

#[test]
fn test_parse_declarations() {
    let source = r#"
        export type Id = string;
        interface Point extends Base { x: number; y: number }
        declare function f(a: 1): 1;
        declare function f(a: 2): 2;
        declare const value: { a: 1 };
    "#;
    let file = parse_source(source).expect("declarations parse");
    let names: Vec<_> = file.declarations.iter().map(|d| d.name()).collect();
    assert_eq!(names, vec!["Id", "Point", "f", "f", "value"]);
    let Declaration::Interface { extends, members, .. } = &file.declarations[1] else {
        panic!("expected interface");
    };
    assert_eq!(extends.len(), 1);
    assert_eq!(members.len(), 2);
}

#[test]
fn test_declaration_expected() {
    let err = parse_source("1 + 1").expect_err("expected a parse error");
    assert_eq!(
        err.first().map(|d| d.code),
        Some(diagnostic_codes::DECLARATION_EXPECTED)
    );
}
