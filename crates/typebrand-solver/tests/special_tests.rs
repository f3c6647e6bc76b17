use super::*;
use crate::lower::{TypeEnv, lower_type_source};

#[test]
fn test_special_predicates_are_exclusive() {
    let solver = Solver::new();
    let cases = [
        (TypeId::NEVER, Some(SpecialKind::Never)),
        (TypeId::ANY, Some(SpecialKind::Any)),
        (TypeId::UNKNOWN, Some(SpecialKind::Unknown)),
        (TypeId::STRING, None),
        (TypeId::VOID, None),
        (solver.interner().empty_object(), None),
    ];
    for (type_id, expected) in cases {
        assert_eq!(special_kind(&solver, type_id), expected, "{type_id:?}");
        let flags = [
            is_never(&solver, type_id),
            is_any(&solver, type_id),
            is_unknown(&solver, type_id),
        ];
        assert!(flags.iter().filter(|&&f| f).count() <= 1);
    }
}

#[test]
fn test_unions_with_special_members_normalize_first() {
    let solver = Solver::new();
    let env = TypeEnv::new();
    let t = lower_type_source(&solver, &env, "string | any").unwrap();
    assert!(is_any(&solver, t));
    let t = lower_type_source(&solver, &env, "string | unknown").unwrap();
    assert!(is_unknown(&solver, t));
    let t = lower_type_source(&solver, &env, "{ a: any }").unwrap();
    assert_eq!(special_kind(&solver, t), None);
}

#[test]
fn test_typed_variants_return_literal_booleans() {
    let solver = Solver::new();
    assert_eq!(is_any_type(&solver, TypeId::ANY), TypeId::TRUE);
    assert_eq!(is_any_type(&solver, TypeId::UNKNOWN), TypeId::FALSE);
    assert_eq!(is_unknown_type(&solver, TypeId::UNKNOWN), TypeId::TRUE);
    assert_eq!(is_never_type(&solver, TypeId::STRING), TypeId::FALSE);
}
