//! Apparent structure of a type: what members it exposes once names are
//! resolved and intersections are merged.

use crate::solver::Solver;
use crate::types::*;
use crate::utils::format_number;
use typebrand_common::Atom;

/// The member view of an object-like type.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Members {
    pub properties: Vec<PropertyInfo>,
    pub call_signatures: Vec<Signature>,
    pub construct_signatures: Vec<Signature>,
    pub string_index: Option<IndexSignature>,
    pub number_index: Option<IndexSignature>,
}

impl Members {
    pub fn property(&self, name: Atom) -> Option<&PropertyInfo> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// `{}`: no members of any kind.
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
            && self.call_signatures.is_empty()
            && self.construct_signatures.is_empty()
            && self.string_index.is_none()
            && self.number_index.is_none()
    }

    fn merge(&mut self, solver: &Solver, other: Members) {
        let interner = solver.interner();
        for prop in other.properties {
            if let Some(existing) = self.properties.iter_mut().find(|p| p.name == prop.name) {
                existing.type_id = interner.intersection2(existing.type_id, prop.type_id);
                existing.optional &= prop.optional;
                existing.readonly |= prop.readonly;
            } else {
                self.properties.push(prop);
            }
        }
        self.call_signatures.extend(other.call_signatures);
        self.construct_signatures.extend(other.construct_signatures);
        self.string_index = merge_index(solver, self.string_index, other.string_index);
        self.number_index = merge_index(solver, self.number_index, other.number_index);
    }
}

fn merge_index(
    solver: &Solver,
    left: Option<IndexSignature>,
    right: Option<IndexSignature>,
) -> Option<IndexSignature> {
    match (left, right) {
        (Some(a), Some(b)) => Some(IndexSignature {
            value_type: solver.interner().intersection2(a.value_type, b.value_type),
            readonly: a.readonly || b.readonly,
        }),
        (a, b) => a.or(b),
    }
}

/// Resolve named types to their bodies and re-merge intersections whose
/// members were named.
pub fn apparent_type(solver: &Solver, type_id: TypeId) -> TypeId {
    let interner = solver.interner();
    let mut current = type_id;
    // Named bodies never refer back to themselves, so this terminates.
    loop {
        match interner.lookup(current) {
            Some(TypeKey::Named(named_id)) => current = interner.named_type(named_id).body,
            Some(TypeKey::Intersection(list_id)) => {
                let members = interner.type_list(list_id);
                let resolved: Vec<TypeId> = members
                    .iter()
                    .map(|&member| apparent_type(solver, member))
                    .collect();
                if resolved.as_slice() == &*members {
                    return current;
                }
                return interner.intersection(resolved);
            }
            _ => return current,
        }
    }
}

/// Members of an object-like type, or `None` for primitives, unions and the
/// special types.
pub fn members_of(solver: &Solver, type_id: TypeId) -> Option<Members> {
    let interner = solver.interner();
    let apparent = apparent_type(solver, type_id);
    match interner.lookup(apparent)? {
        TypeKey::Object(shape_id) => {
            let shape = interner.object_shape(shape_id);
            Some(Members {
                properties: shape.properties.clone(),
                string_index: shape.string_index,
                number_index: shape.number_index,
                ..Members::default()
            })
        }
        TypeKey::Function(shape_id) => {
            let shape = interner.function_shape(shape_id);
            let mut members = Members::default();
            if shape.is_constructor {
                members.construct_signatures.push(shape.signature.clone());
            } else {
                members.call_signatures.push(shape.signature.clone());
            }
            Some(members)
        }
        TypeKey::Callable(shape_id) => {
            let shape = interner.callable_shape(shape_id);
            Some(Members {
                properties: shape.properties.clone(),
                call_signatures: shape.call_signatures.clone(),
                construct_signatures: shape.construct_signatures.clone(),
                ..Members::default()
            })
        }
        TypeKey::Array(element) => Some(array_members(solver, element, false)),
        TypeKey::Tuple(list_id) => Some(tuple_members(solver, &interner.tuple_list(list_id), false)),
        TypeKey::ReadonlyType(inner) => match interner.lookup(inner)? {
            TypeKey::Array(element) => Some(array_members(solver, element, true)),
            TypeKey::Tuple(list_id) => {
                Some(tuple_members(solver, &interner.tuple_list(list_id), true))
            }
            _ => None,
        },
        TypeKey::Intersection(list_id) => {
            let mut merged: Option<Members> = None;
            for &member in interner.type_list(list_id).iter() {
                let Some(member_members) = members_of(solver, member) else {
                    continue;
                };
                match merged.as_mut() {
                    Some(existing) => existing.merge(solver, member_members),
                    None => merged = Some(member_members),
                }
            }
            merged
        }
        TypeKey::Intrinsic(IntrinsicKind::Object) => Some(Members::default()),
        _ => None,
    }
}

fn array_members(solver: &Solver, element: TypeId, readonly: bool) -> Members {
    let interner = solver.interner();
    Members {
        properties: vec![
            PropertyInfo::new(interner.intern_string("length"), TypeId::NUMBER)
                .with_readonly(readonly),
        ],
        number_index: Some(IndexSignature {
            value_type: element,
            readonly,
        }),
        ..Members::default()
    }
}

fn tuple_members(solver: &Solver, elements: &[TupleElement], readonly: bool) -> Members {
    let interner = solver.interner();
    let mut properties = Vec::with_capacity(elements.len() + 1);
    let mut element_types = Vec::with_capacity(elements.len());
    let mut fixed_length = true;
    for (index, element) in elements.iter().enumerate() {
        if element.rest {
            fixed_length = false;
            element_types.push(rest_element_type(solver, element.type_id));
            continue;
        }
        if element.optional {
            fixed_length = false;
        }
        element_types.push(element.type_id);
        properties.push(
            PropertyInfo::new(interner.intern_string(&index.to_string()), element.type_id)
                .with_optional(element.optional)
                .with_readonly(readonly),
        );
    }
    let length = if fixed_length {
        interner.literal_number(elements.len() as f64)
    } else {
        TypeId::NUMBER
    };
    properties.push(
        PropertyInfo::new(interner.intern_string("length"), length).with_readonly(readonly),
    );
    Members {
        properties,
        number_index: Some(IndexSignature {
            value_type: interner.union(element_types),
            readonly,
        }),
        ..Members::default()
    }
}

/// Element type of the array spread by a rest element or rest parameter.
pub fn rest_element_type(solver: &Solver, rest_type: TypeId) -> TypeId {
    match array_element_type(solver, rest_type) {
        Some(element) => element,
        None => match solver.interner().lookup(apparent_type(solver, rest_type)) {
            Some(TypeKey::Tuple(list_id)) => {
                let elements = solver.interner().tuple_list(list_id);
                let types = elements
                    .iter()
                    .map(|e| {
                        if e.rest {
                            rest_element_type(solver, e.type_id)
                        } else {
                            e.type_id
                        }
                    })
                    .collect();
                solver.interner().union(types)
            }
            _ => rest_type,
        },
    }
}

/// `T` for `T[]` and `readonly T[]`.
pub fn array_element_type(solver: &Solver, type_id: TypeId) -> Option<TypeId> {
    let interner = solver.interner();
    match interner.lookup(apparent_type(solver, type_id))? {
        TypeKey::Array(element) => Some(element),
        TypeKey::ReadonlyType(inner) => match interner.lookup(inner)? {
            TypeKey::Array(element) => Some(element),
            _ => None,
        },
        _ => None,
    }
}

/// Tuple elements and the readonly flag for tuple types.
pub fn tuple_elements(solver: &Solver, type_id: TypeId) -> Option<(Vec<TupleElement>, bool)> {
    let interner = solver.interner();
    match interner.lookup(apparent_type(solver, type_id))? {
        TypeKey::Tuple(list_id) => Some((interner.tuple_list(list_id).to_vec(), false)),
        TypeKey::ReadonlyType(inner) => match interner.lookup(inner)? {
            TypeKey::Tuple(list_id) => Some((interner.tuple_list(list_id).to_vec(), true)),
            _ => None,
        },
        _ => None,
    }
}

/// Arrays and tuples, readonly or not.
pub fn is_array_like(solver: &Solver, type_id: TypeId) -> bool {
    array_element_type(solver, type_id).is_some() || tuple_elements(solver, type_id).is_some()
}

pub fn is_readonly_array_like(solver: &Solver, type_id: TypeId) -> bool {
    matches!(
        solver.interner().lookup(apparent_type(solver, type_id)),
        Some(TypeKey::ReadonlyType(_))
    )
}

pub fn call_signatures(solver: &Solver, type_id: TypeId) -> Vec<Signature> {
    members_of(solver, type_id)
        .map(|members| members.call_signatures)
        .unwrap_or_default()
}

pub fn construct_signatures(solver: &Solver, type_id: TypeId) -> Vec<Signature> {
    members_of(solver, type_id)
        .map(|members| members.construct_signatures)
        .unwrap_or_default()
}

/// The type read from property `name`, with `undefined` added for optional
/// properties. Falls back to index signatures.
pub fn property_read_type(solver: &Solver, type_id: TypeId, name: Atom) -> Option<TypeId> {
    let members = members_of(solver, type_id)?;
    if let Some(prop) = members.property(name) {
        return Some(read_type(solver, prop));
    }
    let text = solver.interner().resolve_atom_ref(name);
    if let Some(index) = members.number_index {
        if is_numeric_name(&text) {
            return Some(index.value_type);
        }
    }
    members.string_index.map(|index| index.value_type)
}

/// Declared type of a property plus `undefined` when optional.
pub fn read_type(solver: &Solver, prop: &PropertyInfo) -> TypeId {
    if prop.optional {
        solver.interner().union2(prop.type_id, TypeId::UNDEFINED)
    } else {
        prop.type_id
    }
}

/// Property names that are canonical numeric strings (`"0"`, `"1.5"`).
pub fn is_numeric_name(name: &str) -> bool {
    match name.parse::<f64>() {
        Ok(value) => format_number(value) == name,
        Err(_) => false,
    }
}

/// Primitive types and literals, plus intersections that contain one
/// (branded primitives).
pub fn is_primitive(solver: &Solver, type_id: TypeId) -> bool {
    match type_id {
        TypeId::STRING
        | TypeId::NUMBER
        | TypeId::BOOLEAN
        | TypeId::TRUE
        | TypeId::FALSE
        | TypeId::BIGINT
        | TypeId::SYMBOL
        | TypeId::NULL
        | TypeId::UNDEFINED
        | TypeId::VOID => true,
        _ if type_id.is_reserved() => false,
        _ => match solver.interner().lookup(type_id) {
            Some(TypeKey::Literal(_)) | Some(TypeKey::UniqueSymbol { .. }) => true,
            Some(TypeKey::Intersection(list_id)) => solver
                .interner()
                .type_list(list_id)
                .iter()
                .any(|&member| is_primitive(solver, member)),
            _ => false,
        },
    }
}

#[cfg(test)]
#[path = "../tests/structure_tests.rs"]
mod tests;
