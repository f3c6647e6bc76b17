//! Detection of `never`, `any` and `unknown`.
//!
//! The three predicates are mutually exclusive. Every structural algorithm
//! checks them before decomposing a type, since each of them relates to
//! almost everything under the assignability relation.

use crate::logic::bool_type;
use crate::solver::Solver;
use crate::types::TypeId;

/// The special kind of a type, if it has one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpecialKind {
    Never,
    Any,
    Unknown,
}

pub fn is_never(_solver: &Solver, type_id: TypeId) -> bool {
    type_id == TypeId::NEVER
}

/// `any` is the only type mutually assignable with the opaque probe symbol.
pub fn is_any(solver: &Solver, type_id: TypeId) -> bool {
    let probe = solver.any_probe();
    solver.is_assignable(probe, type_id) && solver.is_assignable(type_id, probe)
}

pub fn is_unknown(solver: &Solver, type_id: TypeId) -> bool {
    solver.is_assignable(TypeId::UNKNOWN, type_id) && !is_any(solver, type_id)
}

pub fn special_kind(solver: &Solver, type_id: TypeId) -> Option<SpecialKind> {
    if is_never(solver, type_id) {
        Some(SpecialKind::Never)
    } else if is_any(solver, type_id) {
        Some(SpecialKind::Any)
    } else if is_unknown(solver, type_id) {
        Some(SpecialKind::Unknown)
    } else {
        None
    }
}

pub fn is_never_type(solver: &Solver, type_id: TypeId) -> TypeId {
    bool_type(is_never(solver, type_id))
}

pub fn is_any_type(solver: &Solver, type_id: TypeId) -> TypeId {
    bool_type(is_any(solver, type_id))
}

pub fn is_unknown_type(solver: &Solver, type_id: TypeId) -> TypeId {
    bool_type(is_unknown(solver, type_id))
}

#[cfg(test)]
#[path = "../tests/special_tests.rs"]
mod tests;
