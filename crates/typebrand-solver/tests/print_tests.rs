use super::*;
use crate::lower::{TypeEnv, lower_type_source};

fn print(solver: &Solver, source: &str) -> Option<String> {
    let type_id = lower_type_source(solver, &TypeEnv::new(), source).unwrap();
    print_type(solver, type_id)
}

#[test]
fn test_print_vocabulary() {
    let solver = Solver::new();
    let cases = [
        ("unknown", "unknown"),
        ("never", "never"),
        ("boolean", "boolean"),
        ("true", "literal boolean: true"),
        ("string", "string"),
        ("\"a\"", "literal string: a"),
        ("number", "number"),
        ("1.5", "literal number: 1.5"),
        ("bigint", "bigint"),
        ("-10n", "literal bigint: -10"),
        ("null", "null"),
        ("undefined", "undefined"),
        ("void", "void"),
        ("symbol", "symbol"),
        ("(a: string) => void", "function"),
        ("{ a: string }", "..."),
        ("string[]", "..."),
    ];
    for (source, expected) in cases {
        assert_eq!(print(&solver, source).as_deref(), Some(expected), "{source}");
    }
    assert_eq!(print(&solver, "any"), None);
}

#[test]
fn test_print_unions() {
    let solver = Solver::new();
    assert_eq!(
        print(&solver, "\"a\" | \"b\"").as_deref(),
        Some("literal string: a | literal string: b")
    );
    assert_eq!(
        print(&solver, "{ a: 1 } | string[]").as_deref(),
        Some(UNPRINTABLE)
    );
    assert_eq!(
        print(&solver, "{ a: 1 } | undefined").as_deref(),
        Some("undefined | ...")
    );
    let t = lower_type_source(&solver, &TypeEnv::new(), "{ a: 1 }").unwrap();
    assert!(is_unprintable(&solver, t));
}
