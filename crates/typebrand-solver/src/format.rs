//! Render types back to TypeScript syntax.

use crate::solver::Solver;
use crate::types::*;
use crate::utils::{format_number, is_identifier_name, quote_string};
use crate::structure::is_numeric_name;
use std::fmt::Write;
use typebrand_common::Atom;

const MAX_FORMAT_DEPTH: u32 = 32;

pub struct TypeFormatter<'a> {
    solver: &'a Solver,
    depth: u32,
    max_depth: u32,
}

impl<'a> TypeFormatter<'a> {
    pub fn new(solver: &'a Solver) -> Self {
        TypeFormatter {
            solver,
            depth: 0,
            max_depth: MAX_FORMAT_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn format(&mut self, type_id: TypeId) -> String {
        if self.depth >= self.max_depth {
            return "...".to_string();
        }
        self.depth += 1;
        let out = self.format_inner(type_id);
        self.depth -= 1;
        out
    }

    fn format_inner(&mut self, type_id: TypeId) -> String {
        if type_id.is_error() {
            return "error".to_string();
        }
        if let Some(kind) = IntrinsicKind::from_type_id(type_id) {
            return kind.name().to_string();
        }
        let solver = self.solver;
        let interner = solver.interner();
        let Some(key) = interner.lookup(type_id) else {
            return "error".to_string();
        };
        match key {
            TypeKey::Intrinsic(kind) => kind.name().to_string(),
            TypeKey::Literal(value) => self.format_literal(value),
            TypeKey::UniqueSymbol { name, .. } => {
                format!("typeof {}", interner.resolve_atom_ref(name))
            }
            TypeKey::Union(list_id) => {
                let mut members = interner.type_list(list_id).to_vec();
                // `null` and `undefined` print last, as the compiler does.
                members.sort_by_key(|&m| matches!(m, TypeId::NULL | TypeId::UNDEFINED));
                let parts: Vec<String> = members
                    .iter()
                    .map(|&m| self.format_member(m, false))
                    .collect();
                parts.join(" | ")
            }
            TypeKey::Intersection(list_id) => {
                let members = interner.type_list(list_id);
                let parts: Vec<String> = members
                    .iter()
                    .map(|&m| self.format_member(m, true))
                    .collect();
                parts.join(" & ")
            }
            TypeKey::Array(element) => format!("{}[]", self.format_element(element)),
            TypeKey::Tuple(list_id) => self.format_tuple(&interner.tuple_list(list_id)),
            TypeKey::ReadonlyType(inner) => format!("readonly {}", self.format(inner)),
            TypeKey::Object(shape_id) => {
                let shape = interner.object_shape(shape_id);
                let mut parts = Vec::new();
                if let Some(index) = shape.string_index {
                    parts.push(self.format_index("string", index));
                }
                if let Some(index) = shape.number_index {
                    parts.push(self.format_index("number", index));
                }
                for prop in &shape.properties {
                    parts.push(self.format_property(prop));
                }
                format_members(parts)
            }
            TypeKey::Function(shape_id) => {
                let shape = interner.function_shape(shape_id);
                let signature = self.format_signature(&shape.signature, " =>");
                if shape.is_constructor {
                    format!("new {signature}")
                } else {
                    signature
                }
            }
            TypeKey::Callable(shape_id) => {
                let shape = interner.callable_shape(shape_id);
                let mut parts = Vec::new();
                for signature in &shape.call_signatures {
                    parts.push(self.format_signature(signature, ":"));
                }
                for signature in &shape.construct_signatures {
                    parts.push(format!("new {}", self.format_signature(signature, ":")));
                }
                for prop in &shape.properties {
                    parts.push(self.format_property(prop));
                }
                format_members(parts)
            }
            TypeKey::Named(named_id) => {
                let named = interner.named_type(named_id);
                let name = interner.resolve_atom_ref(named.name);
                let args = interner.type_list(named.args);
                if args.is_empty() {
                    name.to_string()
                } else {
                    let args: Vec<String> = args.iter().map(|&a| self.format(a)).collect();
                    format!("{name}<{}>", args.join(", "))
                }
            }
        }
    }

    fn format_literal(&self, value: LiteralValue) -> String {
        let interner = self.solver.interner();
        match value {
            LiteralValue::String(atom) => quote_string(&interner.resolve_atom_ref(atom)),
            LiteralValue::Number(value) => format_number(value.0),
            LiteralValue::Boolean(value) => value.to_string(),
            LiteralValue::BigInt(atom) => format!("{}n", interner.resolve_atom_ref(atom)),
        }
    }

    /// Union and intersection members that would otherwise bind wrongly.
    fn format_member(&mut self, type_id: TypeId, in_intersection: bool) -> String {
        let text = self.format(type_id);
        let needs_parens = match self.solver.interner().lookup(type_id) {
            Some(TypeKey::Function(_)) => true,
            Some(TypeKey::Union(_)) => in_intersection,
            _ => false,
        };
        if needs_parens { format!("({text})") } else { text }
    }

    fn format_element(&mut self, type_id: TypeId) -> String {
        let text = self.format(type_id);
        let needs_parens = matches!(
            self.solver.interner().lookup(type_id),
            Some(
                TypeKey::Union(_)
                    | TypeKey::Intersection(_)
                    | TypeKey::Function(_)
                    | TypeKey::ReadonlyType(_)
            )
        );
        if needs_parens { format!("({text})") } else { text }
    }

    fn format_tuple(&mut self, elements: &[TupleElement]) -> String {
        let solver = self.solver;
        let interner = solver.interner();
        let parts: Vec<String> = elements
            .iter()
            .map(|element| {
                let mut out = String::new();
                if element.rest {
                    out.push_str("...");
                }
                let ty = self.format(element.type_id);
                match element.name {
                    Some(name) => {
                        let _ = write!(out, "{}", interner.resolve_atom_ref(name));
                        if element.optional {
                            out.push('?');
                        }
                        let _ = write!(out, ": {ty}");
                    }
                    None => {
                        out.push_str(&ty);
                        if element.optional {
                            out.push('?');
                        }
                    }
                }
                out
            })
            .collect();
        format!("[{}]", parts.join(", "))
    }

    fn format_index(&mut self, key: &str, index: IndexSignature) -> String {
        let readonly = if index.readonly { "readonly " } else { "" };
        format!("{readonly}[x: {key}]: {}", self.format(index.value_type))
    }

    fn format_property(&mut self, prop: &PropertyInfo) -> String {
        let readonly = if prop.readonly { "readonly " } else { "" };
        let optional = if prop.optional { "?" } else { "" };
        format!(
            "{readonly}{}{optional}: {}",
            self.property_name(prop.name),
            self.format(prop.type_id)
        )
    }

    fn property_name(&self, name: Atom) -> String {
        let text = self.solver.interner().resolve_atom_ref(name);
        if is_identifier_name(&text) || is_numeric_name(&text) {
            text.to_string()
        } else {
            quote_string(&text)
        }
    }

    fn format_signature(&mut self, signature: &Signature, arrow: &str) -> String {
        let solver = self.solver;
        let interner = solver.interner();
        let mut params = Vec::with_capacity(signature.params.len() + 1);
        if let Some(this_type) = signature.this_type {
            params.push(format!("this: {}", self.format(this_type)));
        }
        for (index, param) in signature.params.iter().enumerate() {
            let name = match param.name {
                Some(name) => interner.resolve_atom(name),
                None => format!("arg{index}"),
            };
            let rest = if param.rest { "..." } else { "" };
            let optional = if param.optional { "?" } else { "" };
            params.push(format!(
                "{rest}{name}{optional}: {}",
                self.format(param.type_id)
            ));
        }
        let ret = match signature.type_predicate {
            Some(predicate) => {
                let target = match predicate.target {
                    PredicateTarget::This => "this".to_string(),
                    PredicateTarget::Param(index) => signature
                        .params
                        .get(index as usize)
                        .and_then(|p| p.name)
                        .map(|name| interner.resolve_atom(name))
                        .unwrap_or_else(|| format!("arg{index}")),
                };
                let asserts = if predicate.asserts { "asserts " } else { "" };
                match predicate.type_id {
                    Some(ty) => format!("{asserts}{target} is {}", self.format(ty)),
                    None => format!("{asserts}{target}"),
                }
            }
            None => self.format(signature.return_type),
        };
        format!("({}){arrow} {ret}", params.join(", "))
    }
}

fn format_members(parts: Vec<String>) -> String {
    if parts.is_empty() {
        "{}".to_string()
    } else {
        format!("{{ {}; }}", parts.join("; "))
    }
}

/// Shorthand for `TypeFormatter::new(solver).format(type_id)`.
pub fn format_type(solver: &Solver, type_id: TypeId) -> String {
    TypeFormatter::new(solver).format(type_id)
}

#[cfg(test)]
#[path = "../tests/format_tests.rs"]
mod tests;
