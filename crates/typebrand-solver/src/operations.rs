//! Type operators: the mapped and conditional library types (`Pick`,
//! `Partial`, `Exclude`, `Parameters`, ...) evaluated eagerly.

use crate::solver::Solver;
use crate::structure::{self, apparent_type, members_of};
use crate::types::*;
use crate::utils::format_number;
use smallvec::SmallVec;
use typebrand_common::Atom;

/// Union members with `boolean` expanded to `true | false`, the way a
/// distributive conditional type sees them.
pub fn distribution_members(solver: &Solver, type_id: TypeId) -> SmallVec<[TypeId; 8]> {
    let mut out = SmallVec::new();
    let interner = solver.interner();
    let members: SmallVec<[TypeId; 8]> = match interner.lookup(type_id) {
        Some(TypeKey::Union(list_id)) => interner.type_list(list_id).iter().copied().collect(),
        _ => SmallVec::from_slice(&[type_id]),
    };
    for member in members {
        if member == TypeId::BOOLEAN {
            out.push(TypeId::TRUE);
            out.push(TypeId::FALSE);
        } else if member != TypeId::NEVER {
            out.push(member);
        }
    }
    out
}

/// Property names named by a key type: string and number literals, or a
/// union of them. `None` for anything else.
pub fn literal_keys(solver: &Solver, key_type: TypeId) -> Option<Vec<Atom>> {
    let interner = solver.interner();
    let mut keys = Vec::new();
    for member in distribution_members(solver, key_type) {
        match interner.lookup(member)? {
            TypeKey::Literal(LiteralValue::String(atom)) => keys.push(atom),
            TypeKey::Literal(LiteralValue::Number(value)) => {
                keys.push(interner.intern_string(&format_number(value.0)))
            }
            _ => return None,
        }
    }
    Some(keys)
}

fn map_union(solver: &Solver, type_id: TypeId, f: impl Fn(TypeId) -> TypeId) -> TypeId {
    let interner = solver.interner();
    match interner.lookup(type_id) {
        Some(TypeKey::Union(list_id)) => {
            let members = interner.type_list(list_id);
            interner.union(members.iter().map(|&m| f(m)).collect())
        }
        _ => f(type_id),
    }
}

/// `Pick<T, K>`
pub fn pick(solver: &Solver, type_id: TypeId, keys: &[Atom]) -> TypeId {
    if type_id == TypeId::ANY || type_id == TypeId::NEVER {
        return type_id;
    }
    map_union(solver, type_id, |member| {
        let Some(members) = members_of(solver, member) else {
            return solver.interner().empty_object();
        };
        let mut properties = Vec::with_capacity(keys.len());
        for &key in keys {
            if let Some(prop) = members.property(key) {
                properties.push(*prop);
            } else if let Some(index) = members.string_index {
                properties.push(PropertyInfo::new(key, index.value_type).with_readonly(index.readonly));
            }
        }
        solver.interner().object(properties)
    })
}

/// `Omit<T, K>`
pub fn omit(solver: &Solver, type_id: TypeId, keys: &[Atom]) -> TypeId {
    if type_id == TypeId::ANY || type_id == TypeId::NEVER {
        return type_id;
    }
    map_union(solver, type_id, |member| {
        let Some(members) = members_of(solver, member) else {
            return solver.interner().empty_object();
        };
        let properties = members
            .properties
            .into_iter()
            .filter(|p| !keys.contains(&p.name))
            .collect();
        solver.interner().object_with_index(ObjectShape {
            properties,
            string_index: members.string_index,
            number_index: members.number_index,
        })
    })
}

#[derive(Clone, Copy)]
struct Modifiers {
    optional: Option<bool>,
    readonly: Option<bool>,
}

/// Homomorphic mapped type over `T`: primitives pass through, arrays and
/// tuples stay arrays and tuples, objects lose their signatures.
fn map_modifiers(solver: &Solver, type_id: TypeId, modifiers: Modifiers) -> TypeId {
    if type_id.is_intrinsic() && type_id != TypeId::UNKNOWN && type_id != TypeId::OBJECT {
        return type_id;
    }
    map_union(solver, type_id, |member| {
        if structure::is_primitive(solver, member) {
            return member;
        }
        let interner = solver.interner();
        if let Some(element) = structure::array_element_type(solver, member) {
            let element = match modifiers.optional {
                Some(false) => remove_undefined(solver, element),
                _ => element,
            };
            let readonly = modifiers
                .readonly
                .unwrap_or_else(|| structure::is_readonly_array_like(solver, member));
            let array = interner.array(element);
            return if readonly { interner.readonly(array) } else { array };
        }
        if let Some((elements, was_readonly)) = structure::tuple_elements(solver, member) {
            let elements = elements
                .into_iter()
                .map(|mut e| {
                    if !e.rest {
                        if let Some(optional) = modifiers.optional {
                            e.optional = optional;
                        }
                    }
                    e
                })
                .collect();
            let tuple = interner.tuple(elements);
            return if modifiers.readonly.unwrap_or(was_readonly) {
                interner.readonly(tuple)
            } else {
                tuple
            };
        }
        let Some(members) = members_of(solver, member) else {
            return member;
        };
        let properties = members
            .properties
            .into_iter()
            .map(|mut p| {
                if let Some(optional) = modifiers.optional {
                    if !optional && p.optional {
                        p.type_id = remove_undefined(solver, p.type_id);
                    }
                    p.optional = optional;
                }
                if let Some(readonly) = modifiers.readonly {
                    p.readonly = readonly;
                }
                p
            })
            .collect();
        let index = |index: Option<IndexSignature>| {
            index.map(|mut i| {
                if let Some(readonly) = modifiers.readonly {
                    i.readonly = readonly;
                }
                i
            })
        };
        interner.object_with_index(ObjectShape {
            properties,
            string_index: index(members.string_index),
            number_index: index(members.number_index),
        })
    })
}

/// `Partial<T>`
pub fn partial(solver: &Solver, type_id: TypeId) -> TypeId {
    map_modifiers(
        solver,
        type_id,
        Modifiers {
            optional: Some(true),
            readonly: None,
        },
    )
}

/// `Required<T>`
pub fn required(solver: &Solver, type_id: TypeId) -> TypeId {
    map_modifiers(
        solver,
        type_id,
        Modifiers {
            optional: Some(false),
            readonly: None,
        },
    )
}

/// `Readonly<T>`
pub fn readonly(solver: &Solver, type_id: TypeId) -> TypeId {
    map_modifiers(
        solver,
        type_id,
        Modifiers {
            optional: None,
            readonly: Some(true),
        },
    )
}

/// `{ -readonly [K in keyof T]: T[K] }`
pub fn writable(solver: &Solver, type_id: TypeId) -> TypeId {
    map_modifiers(
        solver,
        type_id,
        Modifiers {
            optional: None,
            readonly: Some(false),
        },
    )
}

/// `Record<K, V>`. `None` when `K` is not a valid key type.
pub fn record(solver: &Solver, key_type: TypeId, value: TypeId) -> Option<TypeId> {
    let interner = solver.interner();
    let mut shape = ObjectShape::default();
    for member in distribution_members(solver, key_type) {
        match member {
            TypeId::STRING => {
                shape.string_index = Some(IndexSignature {
                    value_type: value,
                    readonly: false,
                })
            }
            TypeId::NUMBER => {
                shape.number_index = Some(IndexSignature {
                    value_type: value,
                    readonly: false,
                })
            }
            _ => {
                let keys = literal_keys(solver, member)?;
                shape
                    .properties
                    .extend(keys.into_iter().map(|key| PropertyInfo::new(key, value)));
            }
        }
    }
    Some(interner.object_with_index(shape))
}

/// `Exclude<T, U>`
pub fn exclude(solver: &Solver, type_id: TypeId, excluded: TypeId) -> TypeId {
    if type_id == TypeId::ANY {
        return TypeId::ANY;
    }
    let kept = distribution_members(solver, type_id)
        .into_iter()
        .filter(|&member| !solver.is_assignable(member, excluded))
        .collect();
    solver.interner().union(kept)
}

/// `Extract<T, U>`
pub fn extract(solver: &Solver, type_id: TypeId, extracted: TypeId) -> TypeId {
    if type_id == TypeId::ANY {
        return TypeId::ANY;
    }
    let kept = distribution_members(solver, type_id)
        .into_iter()
        .filter(|&member| solver.is_assignable(member, extracted))
        .collect();
    solver.interner().union(kept)
}

/// `NonNullable<T>`
pub fn non_nullable(solver: &Solver, type_id: TypeId) -> TypeId {
    let nullish = solver.interner().union2(TypeId::NULL, TypeId::UNDEFINED);
    exclude(solver, type_id, nullish)
}

fn remove_undefined(solver: &Solver, type_id: TypeId) -> TypeId {
    exclude(solver, type_id, TypeId::UNDEFINED)
}

/// The parameter list of a signature as a (labelled) tuple.
pub fn parameters_tuple(solver: &Solver, signature: &Signature) -> TypeId {
    let elements = signature
        .params
        .iter()
        .map(|p| TupleElement {
            type_id: p.type_id,
            name: p.name,
            optional: p.optional,
            rest: p.rest,
        })
        .collect();
    solver.interner().tuple(elements)
}

fn map_last_signature(
    solver: &Solver,
    type_id: TypeId,
    construct: bool,
    f: &impl Fn(&Signature) -> TypeId,
) -> Option<TypeId> {
    let interner = solver.interner();
    if let Some(TypeKey::Union(list_id)) = interner.lookup(type_id) {
        let members = interner.type_list(list_id);
        let mut mapped = Vec::with_capacity(members.len());
        for &member in members.iter() {
            mapped.push(map_last_signature(solver, member, construct, f)?);
        }
        return Some(interner.union(mapped));
    }
    let signatures = if construct {
        structure::construct_signatures(solver, type_id)
    } else {
        structure::call_signatures(solver, type_id)
    };
    signatures.last().map(f)
}

/// `Parameters<F>`
pub fn parameters(solver: &Solver, type_id: TypeId) -> Option<TypeId> {
    match type_id {
        TypeId::ANY => Some(solver.interner().array(TypeId::UNKNOWN)),
        TypeId::NEVER => Some(TypeId::NEVER),
        _ => map_last_signature(solver, type_id, false, &|sig| parameters_tuple(solver, sig)),
    }
}

/// `ReturnType<F>`
pub fn return_type(solver: &Solver, type_id: TypeId) -> Option<TypeId> {
    match type_id {
        TypeId::ANY | TypeId::NEVER => Some(type_id),
        _ => map_last_signature(solver, type_id, false, &|sig| sig.return_type),
    }
}

/// `ConstructorParameters<C>`
pub fn constructor_parameters(solver: &Solver, type_id: TypeId) -> Option<TypeId> {
    match type_id {
        TypeId::ANY => Some(solver.interner().array(TypeId::UNKNOWN)),
        TypeId::NEVER => Some(TypeId::NEVER),
        _ => map_last_signature(solver, type_id, true, &|sig| parameters_tuple(solver, sig)),
    }
}

/// `InstanceType<C>`
pub fn instance_type(solver: &Solver, type_id: TypeId) -> Option<TypeId> {
    match type_id {
        TypeId::ANY | TypeId::NEVER => Some(type_id),
        _ => map_last_signature(solver, type_id, true, &|sig| sig.return_type),
    }
}

/// `ThisParameterType<F>`: the declared `this` of the last call signature,
/// `unknown` when there is none.
pub fn this_parameter_type(solver: &Solver, type_id: TypeId) -> TypeId {
    structure::call_signatures(solver, type_id)
        .last()
        .and_then(|sig| sig.this_type)
        .unwrap_or(TypeId::UNKNOWN)
}

/// The value a thenable resolves to: `T` for `PromiseLike<T>`.
pub fn promise_value_type(solver: &Solver, type_id: TypeId) -> Option<TypeId> {
    if type_id == TypeId::ANY {
        return Some(TypeId::ANY);
    }
    let then = solver.interner().intern_string("then");
    let then_type = structure::property_read_type(solver, apparent_type(solver, type_id), then)?;
    let then_signature = structure::call_signatures(solver, then_type).pop()?;
    let on_fulfilled = then_signature.params.first()?;
    let callback = non_nullable(solver, on_fulfilled.type_id);
    let callback_signature = structure::call_signatures(solver, callback).pop()?;
    Some(
        callback_signature
            .params
            .first()
            .map_or(TypeId::UNDEFINED, |p| p.type_id),
    )
}

#[cfg(test)]
#[path = "../tests/operations_tests.rs"]
mod tests;
