//! Key sets of object and tuple types: required, optional, readonly and the
//! keys worth walking when describing a mismatch.

use crate::operations;
use crate::solver::Solver;
use crate::structure::{self, members_of};
use crate::types::{TypeId, TypeKey};
use smallvec::SmallVec;
use typebrand_common::Atom;

/// A set of property names, kept sorted so equal sets compare equal.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct KeySet {
    keys: SmallVec<[Atom; 8]>,
}

impl KeySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: Atom) {
        if let Err(position) = self.keys.binary_search(&key) {
            self.keys.insert(position, key);
        }
    }

    pub fn contains(&self, key: Atom) -> bool {
        self.keys.binary_search(&key).is_ok()
    }

    pub fn is_subset(&self, other: &KeySet) -> bool {
        self.keys.iter().all(|&k| other.contains(k))
    }

    pub fn union(&self, other: &KeySet) -> KeySet {
        let mut out = self.clone();
        for &key in &other.keys {
            out.insert(key);
        }
        out
    }

    pub fn difference(&self, other: &KeySet) -> KeySet {
        self.keys.iter().filter(|&&k| !other.contains(k)).copied().collect()
    }

    pub fn intersection(&self, other: &KeySet) -> KeySet {
        self.keys.iter().filter(|&&k| other.contains(k)).copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = Atom> + '_ {
        self.keys.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// The key set as a union of string literal types (`never` when empty).
    pub fn to_type(&self, solver: &Solver) -> TypeId {
        let interner = solver.interner();
        let members = self
            .keys
            .iter()
            .map(|&k| interner.literal_string(&interner.resolve_atom_ref(k)))
            .collect();
        interner.union(members)
    }
}

impl FromIterator<Atom> for KeySet {
    fn from_iter<I: IntoIterator<Item = Atom>>(iter: I) -> Self {
        let mut keys: SmallVec<[Atom; 8]> = iter.into_iter().collect();
        keys.sort_unstable();
        keys.dedup();
        KeySet { keys }
    }
}

/// Declared property names in structural order. Named types and
/// intersections are resolved first; everything without members has none.
pub fn property_keys(solver: &Solver, type_id: TypeId) -> Vec<Atom> {
    members_of(solver, type_id)
        .map(|members| members.properties.iter().map(|p| p.name).collect())
        .unwrap_or_default()
}

pub fn all_keys(solver: &Solver, type_id: TypeId) -> KeySet {
    property_keys(solver, type_id).into_iter().collect()
}

/// Keys whose value can't be left out: `{}` is not assignable to
/// `Pick<T, K>`.
pub fn required_keys(solver: &Solver, type_id: TypeId) -> KeySet {
    let empty = solver.interner().empty_object();
    property_keys(solver, type_id)
        .into_iter()
        .filter(|&key| !solver.is_assignable(empty, operations::pick(solver, type_id, &[key])))
        .collect()
}

pub fn optional_keys(solver: &Solver, type_id: TypeId) -> KeySet {
    all_keys(solver, type_id).difference(&required_keys(solver, type_id))
}

/// Keys whose `Pick<T, K>` differs from its writable copy while the relation
/// still treats the two as interchangeable.
pub fn readonly_keys(solver: &Solver, type_id: TypeId) -> KeySet {
    property_keys(solver, type_id)
        .into_iter()
        .filter(|&key| {
            let picked = operations::pick(solver, type_id, &[key]);
            let writable = operations::writable(solver, picked);
            picked != writable && solver.is_mutually_assignable(picked, writable)
        })
        .collect()
}

/// Keys to walk when comparing two values of this type: declared positions
/// for tuples, nothing for arrays, every property for objects.
pub fn useful_keys(solver: &Solver, type_id: TypeId) -> Vec<Atom> {
    let interner = solver.interner();
    if let Some((elements, _)) = structure::tuple_elements(solver, type_id) {
        return elements
            .iter()
            .enumerate()
            .filter(|(_, element)| !element.rest)
            .map(|(index, _)| interner.intern_string(&index.to_string()))
            .collect();
    }
    if structure::array_element_type(solver, type_id).is_some() {
        return Vec::new();
    }
    match interner.lookup(type_id) {
        Some(TypeKey::Union(_)) => Vec::new(),
        _ => property_keys(solver, type_id),
    }
}

#[cfg(test)]
#[path = "../tests/keys_tests.rs"]
mod tests;
