//! Native structural assignability.
//!
//! Rules follow TypeScript under `strict`: strict null checks, strict
//! (contravariant) function parameters, `readonly` ignored on properties but
//! enforced between readonly and mutable arrays.
//!
//! Order of checks:
//! 1. identity and the special types (`any`, `unknown`, `never`)
//! 2. unions and intersections (source side distributes first)
//! 3. named types (same name with covariant arguments, else bodies)
//! 4. primitives and literals
//! 5. arrays and tuples
//! 6. structural members: properties, index signatures, signatures

use crate::builtins;
use crate::recursion::{RecursionGuard, RecursionProfile, RecursionResult};
use crate::solver::Solver;
use crate::structure::{self, Members, apparent_type, members_of, read_type};
use crate::types::*;
use tracing::trace;
use typebrand_common::ensure_sufficient_stack;

/// Outcome of a single relation step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubtypeResult {
    True,
    False,
    /// The pair is already being checked further up; assumed to hold.
    Provisional,
}

impl SubtypeResult {
    #[inline]
    pub fn is_true(self) -> bool {
        matches!(self, Self::True | Self::Provisional)
    }

    #[inline]
    fn from_bool(value: bool) -> Self {
        if value { Self::True } else { Self::False }
    }
}

pub struct SubtypeChecker<'a> {
    solver: &'a Solver,
    guard: RecursionGuard<(TypeId, TypeId)>,
}

impl<'a> SubtypeChecker<'a> {
    pub fn new(solver: &'a Solver) -> Self {
        SubtypeChecker {
            solver,
            guard: RecursionGuard::with_profile(RecursionProfile::SubtypeCheck),
        }
    }

    pub fn is_assignable(&mut self, source: TypeId, target: TypeId) -> bool {
        self.check_subtype(source, target).is_true()
    }

    /// True once a depth or iteration limit was hit; results are then not
    /// trustworthy enough to cache.
    pub fn is_exceeded(&self) -> bool {
        self.guard.is_exceeded()
    }

    pub fn check_subtype(&mut self, source: TypeId, target: TypeId) -> SubtypeResult {
        if source == target {
            return SubtypeResult::True;
        }
        if target == TypeId::ANY || target == TypeId::UNKNOWN || target.is_error() {
            return SubtypeResult::True;
        }
        if source == TypeId::NEVER || source.is_error() {
            return SubtypeResult::True;
        }
        if source == TypeId::ANY {
            return SubtypeResult::from_bool(target != TypeId::NEVER);
        }
        if target == TypeId::NEVER || source == TypeId::UNKNOWN {
            return SubtypeResult::False;
        }

        let key = (source, target);
        match self.guard.enter(key) {
            RecursionResult::Entered => {}
            RecursionResult::Cycle => return SubtypeResult::Provisional,
            RecursionResult::DepthExceeded | RecursionResult::IterationExceeded => {
                trace!(source = source.0, target = target.0, "relation limit exceeded");
                return SubtypeResult::False;
            }
        }
        let result = ensure_sufficient_stack(|| self.check_subtype_inner(source, target));
        self.guard.leave(key);
        result
    }

    fn check_subtype_inner(&mut self, source: TypeId, target: TypeId) -> SubtypeResult {
        let interner = self.solver.interner();
        let source_key = interner.lookup(source);
        let target_key = interner.lookup(target);

        if let Some(TypeKey::Union(list_id)) = source_key {
            let members = interner.type_list(list_id);
            return SubtypeResult::from_bool(
                members.iter().all(|&m| self.check_subtype(m, target).is_true()),
            );
        }
        if source == TypeId::BOOLEAN {
            if let Some(TypeKey::Union(_)) = target_key {
                return SubtypeResult::from_bool(
                    self.check_subtype(TypeId::TRUE, target).is_true()
                        && self.check_subtype(TypeId::FALSE, target).is_true(),
                );
            }
        }
        if let Some(TypeKey::Union(list_id)) = target_key {
            let members = interner.type_list(list_id);
            if members.iter().any(|&m| self.check_subtype(source, m).is_true()) {
                return SubtypeResult::True;
            }
            // An intersection source may only satisfy the union once merged.
            if let Some(TypeKey::Intersection(_)) = source_key {
                let apparent = apparent_type(self.solver, source);
                if apparent != source {
                    return self.check_subtype(apparent, target);
                }
            }
            return SubtypeResult::False;
        }
        if let Some(TypeKey::Intersection(list_id)) = target_key {
            let members = interner.type_list(list_id);
            return SubtypeResult::from_bool(
                members.iter().all(|&m| self.check_subtype(source, m).is_true()),
            );
        }
        if let Some(TypeKey::Intersection(list_id)) = source_key {
            let members = interner.type_list(list_id);
            if members.iter().any(|&m| self.check_subtype(m, target).is_true()) {
                return SubtypeResult::True;
            }
            let apparent = apparent_type(self.solver, source);
            if apparent != source {
                return self.check_subtype(apparent, target);
            }
            return self.check_structural(source, target);
        }

        if let Some(result) = self.check_named(source, &source_key, target, &target_key) {
            return result;
        }

        if let Some(result) = self.check_primitive(source, &source_key, target) {
            return result;
        }

        if target == TypeId::OBJECT {
            return SubtypeResult::from_bool(members_of(self.solver, source).is_some());
        }

        if let Some(result) = self.check_array_like(source, &source_key, &target_key) {
            return result;
        }

        self.check_structural(source, target)
    }

    fn check_named(
        &mut self,
        source: TypeId,
        source_key: &Option<TypeKey>,
        target: TypeId,
        target_key: &Option<TypeKey>,
    ) -> Option<SubtypeResult> {
        let interner = self.solver.interner();
        let source_named = match source_key {
            Some(TypeKey::Named(id)) => Some(interner.named_type(*id)),
            _ => None,
        };
        let target_named = match target_key {
            Some(TypeKey::Named(id)) => Some(interner.named_type(*id)),
            _ => None,
        };

        if let (Some(s), Some(t)) = (&source_named, &target_named) {
            if s.name == t.name && s.builtin == t.builtin {
                let s_args = interner.type_list(s.args);
                let t_args = interner.type_list(t.args);
                if s_args.len() == t_args.len()
                    && s_args
                        .iter()
                        .zip(t_args.iter())
                        .all(|(&sa, &ta)| self.check_subtype(sa, ta).is_true())
                {
                    return Some(SubtypeResult::True);
                }
            }
        }

        if let Some(t) = &target_named {
            if t.builtin && interner.resolve_atom_ref(t.name).as_ref() == builtins::FUNCTION {
                let callable = members_of(self.solver, source).is_some_and(|m| {
                    !m.call_signatures.is_empty() || !m.construct_signatures.is_empty()
                });
                if callable {
                    return Some(SubtypeResult::True);
                }
            }
        }

        if let Some(s) = source_named {
            return Some(self.check_subtype(s.body, target));
        }
        if let Some(t) = target_named {
            return Some(self.check_subtype(source, t.body));
        }
        None
    }

    fn check_primitive(
        &mut self,
        source: TypeId,
        source_key: &Option<TypeKey>,
        target: TypeId,
    ) -> Option<SubtypeResult> {
        let widened = match source_key {
            Some(TypeKey::Literal(literal)) => Some(literal.primitive()),
            Some(TypeKey::UniqueSymbol { .. }) => Some(TypeId::SYMBOL),
            _ => None,
        };
        if let Some(primitive) = widened {
            if primitive == target {
                return Some(SubtypeResult::True);
            }
            return Some(self.primitive_to_object(target));
        }
        if source == TypeId::UNDEFINED && target == TypeId::VOID {
            return Some(SubtypeResult::True);
        }
        if source.is_intrinsic() && source != TypeId::OBJECT {
            return Some(self.primitive_to_object(target));
        }
        let target_is_primitive = target.is_intrinsic() && target != TypeId::OBJECT;
        let target_is_unit = matches!(
            self.solver.interner().lookup(target),
            Some(TypeKey::Literal(_)) | Some(TypeKey::UniqueSymbol { .. })
        );
        if target_is_primitive || target_is_unit {
            return Some(SubtypeResult::False);
        }
        None
    }

    /// Primitives only reach object types with no members at all (`{}`).
    fn primitive_to_object(&mut self, target: TypeId) -> SubtypeResult {
        if target == TypeId::OBJECT {
            return SubtypeResult::False;
        }
        let accepts = match self.solver.interner().lookup(target) {
            Some(TypeKey::Object(_)) => {
                members_of(self.solver, target).is_some_and(|m| m.is_empty())
            }
            _ => false,
        };
        SubtypeResult::from_bool(accepts)
    }

    fn check_array_like(
        &mut self,
        source: TypeId,
        source_key: &Option<TypeKey>,
        target_key: &Option<TypeKey>,
    ) -> Option<SubtypeResult> {
        let interner = self.solver.interner();
        match target_key {
            Some(TypeKey::Array(t_elem)) => {
                let result = match source_key {
                    Some(TypeKey::Array(s_elem)) => self.check_subtype(*s_elem, *t_elem),
                    Some(TypeKey::Tuple(list_id)) => {
                        let elements = interner.tuple_list(*list_id);
                        SubtypeResult::from_bool(elements.iter().all(|e| {
                            let element = if e.rest {
                                structure::rest_element_type(self.solver, e.type_id)
                            } else {
                                e.type_id
                            };
                            self.check_subtype(element, *t_elem).is_true()
                        }))
                    }
                    _ => SubtypeResult::False,
                };
                Some(result)
            }
            Some(TypeKey::ReadonlyType(t_inner)) => {
                let result = match source_key {
                    Some(TypeKey::ReadonlyType(s_inner)) => self.check_subtype(*s_inner, *t_inner),
                    Some(TypeKey::Array(_)) | Some(TypeKey::Tuple(_)) => {
                        self.check_subtype(source, *t_inner)
                    }
                    _ => SubtypeResult::False,
                };
                Some(result)
            }
            Some(TypeKey::Tuple(t_list)) => {
                let result = match source_key {
                    Some(TypeKey::Tuple(s_list)) => {
                        let s_elems = interner.tuple_list(*s_list);
                        let t_elems = interner.tuple_list(*t_list);
                        self.check_tuple_subtype(&s_elems, &t_elems)
                    }
                    _ => SubtypeResult::False,
                };
                Some(result)
            }
            _ => None,
        }
    }

    /// Tuple subtyping with fixed elements followed by at most one rest
    /// element. Rest elements in the middle are folded into the rest type.
    fn check_tuple_subtype(
        &mut self,
        source: &[TupleElement],
        target: &[TupleElement],
    ) -> SubtypeResult {
        let (s_fixed, s_rest) = self.split_tuple(source);
        let (t_fixed, t_rest) = self.split_tuple(target);

        let s_required = s_fixed.iter().filter(|e| !e.optional).count();
        let t_required = t_fixed.iter().filter(|e| !e.optional).count();
        if s_required < t_required {
            return SubtypeResult::False;
        }
        if t_rest.is_none() && (s_rest.is_some() || s_fixed.len() > t_fixed.len()) {
            return SubtypeResult::False;
        }

        for (index, t_elem) in t_fixed.iter().enumerate() {
            let s_type = match s_fixed.get(index) {
                Some(s_elem) => {
                    if s_elem.optional && !t_elem.optional {
                        return SubtypeResult::False;
                    }
                    s_elem.type_id
                }
                None => match s_rest {
                    // `[...T[]]` may be empty, so it cannot fill a required slot.
                    Some(_) if !t_elem.optional => return SubtypeResult::False,
                    Some(rest) => rest,
                    None => continue,
                },
            };
            if !self.check_subtype(s_type, t_elem.type_id).is_true() {
                return SubtypeResult::False;
            }
        }

        if let Some(t_rest) = t_rest {
            for s_elem in s_fixed.iter().skip(t_fixed.len()) {
                if !self.check_subtype(s_elem.type_id, t_rest).is_true() {
                    return SubtypeResult::False;
                }
            }
            if let Some(s_rest) = s_rest {
                if !self.check_subtype(s_rest, t_rest).is_true() {
                    return SubtypeResult::False;
                }
            }
        }
        SubtypeResult::True
    }

    fn split_tuple(&self, elements: &[TupleElement]) -> (Vec<TupleElement>, Option<TypeId>) {
        let mut fixed = Vec::with_capacity(elements.len());
        let mut rest_types = Vec::new();
        for element in elements {
            if element.rest {
                rest_types.push(structure::rest_element_type(self.solver, element.type_id));
            } else if rest_types.is_empty() {
                fixed.push(*element);
            } else {
                rest_types.push(element.type_id);
            }
        }
        let rest = if rest_types.is_empty() {
            None
        } else {
            Some(self.solver.interner().union(rest_types))
        };
        (fixed, rest)
    }

    fn check_structural(&mut self, source: TypeId, target: TypeId) -> SubtypeResult {
        let Some(t_members) = members_of(self.solver, target) else {
            return SubtypeResult::False;
        };
        let Some(s_members) = members_of(self.solver, source) else {
            return SubtypeResult::False;
        };
        if !self.check_properties(&s_members, &t_members) {
            return SubtypeResult::False;
        }
        if !self.check_index_signatures(&s_members, &t_members) {
            return SubtypeResult::False;
        }
        if !self.check_signature_sets(&s_members.call_signatures, &t_members.call_signatures) {
            return SubtypeResult::False;
        }
        SubtypeResult::from_bool(self.check_signature_sets(
            &s_members.construct_signatures,
            &t_members.construct_signatures,
        ))
    }

    fn check_properties(&mut self, source: &Members, target: &Members) -> bool {
        for t_prop in &target.properties {
            match source.property(t_prop.name) {
                Some(s_prop) => {
                    if s_prop.optional && !t_prop.optional {
                        return false;
                    }
                    let s_type = read_type(self.solver, s_prop);
                    let t_type = read_type(self.solver, t_prop);
                    if !self.check_subtype(s_type, t_type).is_true() {
                        return false;
                    }
                }
                None if t_prop.optional => {}
                None => return false,
            }
        }
        true
    }

    fn check_index_signatures(&mut self, source: &Members, target: &Members) -> bool {
        if let Some(t_index) = target.string_index {
            for s_prop in &source.properties {
                let s_type = read_type(self.solver, s_prop);
                if !self.check_subtype(s_type, t_index.value_type).is_true() {
                    return false;
                }
            }
            for s_index in [source.string_index, source.number_index].into_iter().flatten() {
                if !self.check_subtype(s_index.value_type, t_index.value_type).is_true() {
                    return false;
                }
            }
        }
        if let Some(t_index) = target.number_index {
            let interner = self.solver.interner();
            for s_prop in &source.properties {
                let name = interner.resolve_atom_ref(s_prop.name);
                if !structure::is_numeric_name(&name) {
                    continue;
                }
                let s_type = read_type(self.solver, s_prop);
                if !self.check_subtype(s_type, t_index.value_type).is_true() {
                    return false;
                }
            }
            for s_index in [source.number_index, source.string_index].into_iter().flatten() {
                if !self.check_subtype(s_index.value_type, t_index.value_type).is_true() {
                    return false;
                }
            }
        }
        true
    }

    /// Every target signature needs some source signature assignable to it.
    fn check_signature_sets(&mut self, source: &[Signature], target: &[Signature]) -> bool {
        target.iter().all(|t_sig| {
            source
                .iter()
                .any(|s_sig| self.check_signature(s_sig, t_sig))
        })
    }

    fn check_signature(&mut self, source: &Signature, target: &Signature) -> bool {
        let target_arity = if target.has_rest() {
            usize::MAX
        } else {
            target.params.len()
        };
        if source.min_argument_count() > target_arity {
            return false;
        }

        let positions = source.params.len().max(target.params.len());
        for index in 0..positions {
            let Some(s_param) = self.param_type_at(source, index) else {
                continue;
            };
            let Some(t_param) = self.param_type_at(target, index) else {
                continue;
            };
            if !self.check_subtype(t_param, s_param).is_true() {
                return false;
            }
        }
        if let (Some(s_rest), Some(t_rest)) = (source.params.last(), target.params.last()) {
            if s_rest.rest && t_rest.rest && !self.check_subtype(t_rest.type_id, s_rest.type_id).is_true() {
                return false;
            }
        }

        if let (Some(s_this), Some(t_this)) = (source.this_type, target.this_type) {
            if !self.check_subtype(t_this, s_this).is_true() {
                return false;
            }
        }

        if let Some(t_pred) = target.type_predicate {
            let Some(s_pred) = source.type_predicate else {
                return false;
            };
            if s_pred.asserts != t_pred.asserts || s_pred.target != t_pred.target {
                return false;
            }
            match (s_pred.type_id, t_pred.type_id) {
                (Some(s_ty), Some(t_ty)) => {
                    if !self.check_subtype(s_ty, t_ty).is_true() {
                        return false;
                    }
                }
                (None, None) => {}
                _ => return false,
            }
        }

        if target.return_type == TypeId::VOID {
            return true;
        }
        self.check_subtype(source.return_type, target.return_type)
            .is_true()
    }

    /// Parameter type at a position, looking through a trailing rest.
    fn param_type_at(&self, signature: &Signature, index: usize) -> Option<TypeId> {
        match signature.params.get(index) {
            Some(param) if param.rest => {
                Some(structure::rest_element_type(self.solver, param.type_id))
            }
            Some(param) => Some(param.type_id),
            None => {
                let last = signature.params.last()?;
                if last.rest {
                    Some(structure::rest_element_type(self.solver, last.type_id))
                } else {
                    None
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../tests/relation_tests.rs"]
mod tests;
