//! Equivalence relations built on the native relation and on branding.

use crate::brand::{brand_extends, brand_matches, deep_brand};
use crate::recursion::{DepthCounter, RecursionProfile};
use crate::solver::Solver;
use crate::special;
use crate::types::*;
use bitflags::bitflags;
use tracing::trace;

bitflags! {
    /// Structure whose differences the native relation can miss. A pair
    /// of mutually assignable types without any of it is equal.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Sensitivity: u16 {
        /// `any`, `unknown` or `never` anywhere in the type.
        const SPECIAL = 1 << 0;
        const OPTIONAL = 1 << 1;
        const READONLY = 1 << 2;
        /// Call or construct signatures.
        const CALLABLE = 1 << 3;
        const INDEX = 1 << 4;
        const INTERSECTION = 1 << 5;
        /// Named types, which may hit the nominal registry.
        const NAMED = 1 << 6;
    }
}

/// Shallow structural scan for brand-sensitive structure, cached per type.
pub fn sensitivity(solver: &Solver, type_id: TypeId) -> Sensitivity {
    if let Some(cached) = solver.cache().sensitivity(type_id) {
        return cached;
    }
    let mut depth = DepthCounter::with_profile(RecursionProfile::ShallowTraversal);
    let flags = scan(solver, type_id, &mut depth);
    solver.cache().insert_sensitivity(type_id, flags);
    flags
}

fn scan(solver: &Solver, type_id: TypeId, depth: &mut DepthCounter) -> Sensitivity {
    if matches!(type_id, TypeId::ANY | TypeId::UNKNOWN | TypeId::NEVER) {
        return Sensitivity::SPECIAL;
    }
    if type_id.is_reserved() {
        return Sensitivity::empty();
    }
    if !depth.enter() {
        return Sensitivity::all();
    }
    let flags = scan_key(solver, type_id, depth);
    depth.leave();
    flags
}

fn scan_key(solver: &Solver, type_id: TypeId, depth: &mut DepthCounter) -> Sensitivity {
    let interner = solver.interner();
    let Some(key) = interner.lookup(type_id) else {
        return Sensitivity::empty();
    };
    let mut flags = Sensitivity::empty();
    match key {
        TypeKey::Intrinsic(_) | TypeKey::Literal(_) | TypeKey::UniqueSymbol { .. } => {}
        TypeKey::Union(list_id) => {
            for &member in interner.type_list(list_id).iter() {
                flags |= scan(solver, member, depth);
            }
        }
        TypeKey::Intersection(list_id) => {
            flags |= Sensitivity::INTERSECTION;
            for &member in interner.type_list(list_id).iter() {
                flags |= scan(solver, member, depth);
            }
        }
        TypeKey::Array(element) => flags |= scan(solver, element, depth),
        TypeKey::Tuple(list_id) => {
            for element in interner.tuple_list(list_id).iter() {
                if element.optional || element.rest {
                    flags |= Sensitivity::OPTIONAL;
                }
                flags |= scan(solver, element.type_id, depth);
            }
        }
        TypeKey::ReadonlyType(inner) => {
            flags |= Sensitivity::READONLY | scan(solver, inner, depth);
        }
        TypeKey::Object(shape_id) => {
            let shape = interner.object_shape(shape_id);
            if shape.string_index.is_some() || shape.number_index.is_some() {
                flags |= Sensitivity::INDEX;
            }
            for index in [shape.string_index, shape.number_index].into_iter().flatten() {
                flags |= scan(solver, index.value_type, depth);
            }
            for prop in &shape.properties {
                if prop.optional {
                    flags |= Sensitivity::OPTIONAL;
                }
                if prop.readonly {
                    flags |= Sensitivity::READONLY;
                }
                flags |= scan(solver, prop.type_id, depth);
            }
        }
        TypeKey::Function(_) | TypeKey::Callable(_) => flags |= Sensitivity::CALLABLE,
        TypeKey::Named(_) => flags |= Sensitivity::NAMED,
    }
    flags
}

/// `[L] extends [R]`, except that `never` only extends `never`.
pub fn extends(solver: &Solver, left: TypeId, right: TypeId) -> bool {
    if left == TypeId::NEVER {
        return right == TypeId::NEVER;
    }
    solver.is_assignable(left, right)
}

/// Mutual extension of the two brands.
pub fn strict_equal_using_branding(solver: &Solver, left: TypeId, right: TypeId) -> bool {
    let l = deep_brand(solver, left);
    let r = deep_brand(solver, right);
    brand_extends(solver, &l, &r) && brand_extends(solver, &r, &l)
}

/// Branded one-directional match: the native `extends`, then the brands
/// compared over the keys of `right`. Extra properties and readonly pass;
/// `any` where `right` has `unknown` does not.
pub fn extends_using_branding(solver: &Solver, left: TypeId, right: TypeId) -> bool {
    extends(solver, left, right)
        && brand_matches(solver, &deep_brand(solver, left), &deep_brand(solver, right))
}

/// The cheap identity check: the special kinds agree at the top level,
/// then interned identity or mutual assignability decides. Permissive for
/// nested `any`, optional versus `undefined`, and readonly.
pub fn strict_equal_using_internal_identity(solver: &Solver, left: TypeId, right: TypeId) -> bool {
    if special::special_kind(solver, left) != special::special_kind(solver, right) {
        return false;
    }
    left == right || solver.is_mutually_assignable(left, right)
}

/// Two-tier strict equality: the native relation settles most pairs and
/// branding only runs when brand-sensitive structure is involved.
pub fn strict_equal(solver: &Solver, left: TypeId, right: TypeId) -> bool {
    if left == right {
        return true;
    }
    if !(extends(solver, left, right) && extends(solver, right, left)) {
        return false;
    }
    let flags = sensitivity(solver, left) | sensitivity(solver, right);
    if flags.is_empty() {
        trace!(left = left.0, right = right.0, "strict_equal settled without branding");
        return true;
    }
    trace!(left = left.0, right = right.0, ?flags, "strict_equal falls back to branding");
    strict_equal_using_branding(solver, left, right)
}

#[cfg(test)]
#[path = "../tests/equality_tests.rs"]
mod tests;
