//! The small fixed vocabulary used in mismatch messages.

use crate::solver::Solver;
use crate::special::{self, SpecialKind};
use crate::structure;
use crate::types::*;
use crate::utils::format_number;

/// Printed for anything outside the vocabulary (objects, arrays, ...).
pub const UNPRINTABLE: &str = "...";

/// Short description of a type, or `None` for `any`.
///
/// Literals print as `literal <kind>: <value>`; unions print their members
/// joined by ` | ` unless every member is unprintable.
pub fn print_type(solver: &Solver, type_id: TypeId) -> Option<String> {
    match special::special_kind(solver, type_id) {
        Some(SpecialKind::Any) => return None,
        Some(SpecialKind::Unknown) => return Some("unknown".to_string()),
        Some(SpecialKind::Never) => return Some("never".to_string()),
        None => {}
    }
    let interner = solver.interner();
    let text = match type_id {
        TypeId::BOOLEAN => "boolean".to_string(),
        TypeId::TRUE => "literal boolean: true".to_string(),
        TypeId::FALSE => "literal boolean: false".to_string(),
        TypeId::STRING => "string".to_string(),
        TypeId::NUMBER => "number".to_string(),
        TypeId::BIGINT => "bigint".to_string(),
        TypeId::NULL => "null".to_string(),
        TypeId::UNDEFINED => "undefined".to_string(),
        TypeId::VOID => "void".to_string(),
        TypeId::SYMBOL => "symbol".to_string(),
        _ => match interner.lookup(type_id) {
            Some(TypeKey::Literal(literal)) => match literal {
                LiteralValue::String(atom) => {
                    format!("literal string: {}", interner.resolve_atom_ref(atom))
                }
                LiteralValue::Number(value) => {
                    format!("literal number: {}", format_number(value.0))
                }
                LiteralValue::Boolean(value) => format!("literal boolean: {value}"),
                LiteralValue::BigInt(atom) => {
                    format!("literal bigint: {}", interner.resolve_atom_ref(atom))
                }
            },
            Some(TypeKey::Union(list_id)) => {
                let parts: Vec<String> = interner
                    .type_list(list_id)
                    .iter()
                    .map(|&m| print_type(solver, m).unwrap_or_else(|| "any".to_string()))
                    .collect();
                if parts.iter().all(|p| p == UNPRINTABLE) {
                    UNPRINTABLE.to_string()
                } else {
                    parts.join(" | ")
                }
            }
            _ if !structure::call_signatures(solver, type_id).is_empty() => "function".to_string(),
            _ => UNPRINTABLE.to_string(),
        },
    };
    Some(text)
}

/// Whether mismatch synthesis should look inside the type instead of
/// printing it.
pub fn is_unprintable(solver: &Solver, type_id: TypeId) -> bool {
    print_type(solver, type_id).is_some_and(|text| text == UNPRINTABLE)
}

#[cfg(test)]
#[path = "../tests/print_tests.rs"]
mod tests;
