//! Type-level boolean logic over `true`, `false` and `boolean`.
//!
//! The operators distribute over unions the way a conditional type does, so
//! `not(boolean)` is `boolean` and `and([true, boolean])` is `false`.

use crate::operations::distribution_members;
use crate::solver::Solver;
use crate::types::TypeId;

#[inline]
pub fn bool_type(value: bool) -> TypeId {
    if value { TypeId::TRUE } else { TypeId::FALSE }
}

/// `true` becomes `false`; every other member becomes `true`.
pub fn not(solver: &Solver, type_id: TypeId) -> TypeId {
    let members: Vec<TypeId> = distribution_members(solver, type_id)
        .into_iter()
        .map(|member| bool_type(member != TypeId::TRUE))
        .collect();
    solver.interner().union(members)
}

/// `true` when every input is exactly `true`. Vacuously `true` for no inputs.
pub fn and(solver: &Solver, types: &[TypeId]) -> TypeId {
    let union = solver.interner().union(types.to_vec());
    bool_type(solver.is_assignable(union, TypeId::TRUE))
}

/// `true` when some input can be `true`.
pub fn or(solver: &Solver, types: &[TypeId]) -> TypeId {
    let union = solver.interner().union(types.to_vec());
    bool_type(solver.is_assignable(TypeId::TRUE, union))
}

pub fn xor(solver: &Solver, left: TypeId, right: TypeId) -> TypeId {
    let only_left = and(solver, &[left, not(solver, right)]);
    let only_right = and(solver, &[not(solver, left), right]);
    or(solver, &[only_left, only_right])
}

/// Literal equality of two boolean-like types, distributed over both sides.
pub fn eq(solver: &Solver, left: TypeId, right: TypeId) -> TypeId {
    let mut results = Vec::new();
    for l in distribution_members(solver, left) {
        for r in distribution_members(solver, right) {
            results.push(bool_type(l == r));
        }
    }
    solver.interner().union(results)
}

#[cfg(test)]
#[path = "../tests/logic_tests.rs"]
mod tests;
