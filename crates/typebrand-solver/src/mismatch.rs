//! Mismatch synthesis: walk the actual and expected types in lock-step and
//! describe where they differ.

use crate::equality::strict_equal_using_branding;
use crate::keys::useful_keys;
use crate::operations::exclude;
use crate::print::{UNPRINTABLE, print_type};
use crate::recursion::{DepthCounter, RecursionProfile};
use crate::solver::Solver;
use crate::special;
use crate::structure::{array_element_type, property_read_type};
use crate::types::*;
use indexmap::IndexMap;
use typebrand_common::ensure_sufficient_stack;

/// Where two types differ. Built once per failed comparison, never mutated.
#[derive(Clone, Debug, PartialEq)]
pub enum MismatchInfo {
    /// No problem at this position; carries the actual type.
    Ok(TypeId),
    /// `"Expected: X, Actual: Y"`
    Message(String),
    /// Per-key results, actual's keys first.
    Properties(IndexMap<String, MismatchInfo>),
    /// Element-wise result for a pair of arrays.
    Array(Box<MismatchInfo>),
}

impl MismatchInfo {
    /// No message anywhere in the tree.
    pub fn is_ok(&self) -> bool {
        match self {
            MismatchInfo::Ok(_) => true,
            MismatchInfo::Message(_) => false,
            MismatchInfo::Properties(map) => map.values().all(MismatchInfo::is_ok),
            MismatchInfo::Array(inner) => inner.is_ok(),
        }
    }

    /// Every message with its path (`.a.b`, `[number]`), in tree order.
    pub fn messages(&self) -> Vec<(String, &str)> {
        let mut out = Vec::new();
        self.collect_messages(String::new(), &mut out);
        out
    }

    fn collect_messages<'a>(&'a self, path: String, out: &mut Vec<(String, &'a str)>) {
        match self {
            MismatchInfo::Ok(_) => {}
            MismatchInfo::Message(message) => out.push((path, message)),
            MismatchInfo::Properties(map) => {
                for (key, info) in map {
                    info.collect_messages(format!("{path}.{key}"), out);
                }
            }
            MismatchInfo::Array(inner) => inner.collect_messages(format!("{path}[number]"), out),
        }
    }
}

/// Describe how `actual` differs from `expected`.
pub fn mismatch_info(solver: &Solver, actual: TypeId, expected: TypeId) -> MismatchInfo {
    let mut depth = DepthCounter::with_profile(RecursionProfile::Mismatch);
    walk(solver, actual, expected, &mut depth)
}

fn walk(solver: &Solver, actual: TypeId, expected: TypeId, depth: &mut DepthCounter) -> MismatchInfo {
    let decompose = !special::is_any(solver, actual)
        && print_type(solver, actual).as_deref() == Some(UNPRINTABLE);
    if decompose && depth.enter() {
        let info = ensure_sufficient_stack(|| decompose_pair(solver, actual, expected, depth));
        depth.leave();
        return info;
    }
    compare_leaf(solver, actual, expected)
}

fn compare_leaf(solver: &Solver, actual: TypeId, expected: TypeId) -> MismatchInfo {
    if strict_equal_using_branding(solver, actual, expected) {
        return MismatchInfo::Ok(actual);
    }
    let expected_text = print_type(solver, expected).unwrap_or_else(|| "any".to_string());
    let actual_text = print_type(solver, exclude(solver, actual, expected))
        .unwrap_or_else(|| "any".to_string());
    MismatchInfo::Message(format!("Expected: {expected_text}, Actual: {actual_text}"))
}

fn decompose_pair(
    solver: &Solver,
    actual: TypeId,
    expected: TypeId,
    depth: &mut DepthCounter,
) -> MismatchInfo {
    let interner = solver.interner();
    let any_array = interner.array(TypeId::ANY);
    if solver.is_assignable(any_array, actual) && solver.is_assignable(any_array, expected) {
        let element = |t: TypeId| {
            array_element_type(solver, t).unwrap_or(TypeId::NEVER)
        };
        return MismatchInfo::Array(Box::new(walk(
            solver,
            element(actual),
            element(expected),
            depth,
        )));
    }

    let mut keys = useful_keys(solver, actual);
    for key in useful_keys(solver, expected) {
        if !keys.contains(&key) {
            keys.push(key);
        }
    }
    if keys.is_empty() {
        return compare_leaf(solver, actual, expected);
    }
    let mut properties = IndexMap::with_capacity(keys.len());
    for key in keys {
        let actual_value = property_read_type(solver, actual, key).unwrap_or(TypeId::NEVER);
        let expected_value = property_read_type(solver, expected, key).unwrap_or(TypeId::NEVER);
        properties.insert(
            interner.resolve_atom(key),
            walk(solver, actual_value, expected_value, depth),
        );
    }
    MismatchInfo::Properties(properties)
}

#[cfg(test)]
#[path = "../tests/mismatch_tests.rs"]
mod tests;
