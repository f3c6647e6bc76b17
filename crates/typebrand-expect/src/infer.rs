//! Subject types inferred from JSON values.

use serde_json::Value;
use typebrand_solver::Solver;
use typebrand_solver::types::{PropertyInfo, TupleElement, TypeId};

/// How literal values are typed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Widening {
    /// `{"a": 1}` is `{ a: number }`, as for a mutable binding.
    #[default]
    Widen,
    /// `{"a": 1}` is `{ readonly a: 1 }` and arrays are readonly tuples,
    /// as for an `as const` assertion.
    Const,
}

/// The type of `value`.
pub fn value_type(solver: &Solver, value: &Value, widening: Widening) -> TypeId {
    let interner = solver.interner();
    let widen = widening == Widening::Widen;
    match value {
        Value::Null => TypeId::NULL,
        Value::Bool(_) if widen => TypeId::BOOLEAN,
        Value::Bool(b) => interner.literal_boolean(*b),
        Value::Number(_) if widen => TypeId::NUMBER,
        Value::Number(n) => n
            .as_f64()
            .map_or(TypeId::NUMBER, |v| interner.literal_number(v)),
        Value::String(_) if widen => TypeId::STRING,
        Value::String(s) => interner.literal_string(s),
        Value::Array(items) if widen => {
            let element = interner.union(
                items
                    .iter()
                    .map(|item| value_type(solver, item, widening))
                    .collect(),
            );
            interner.array(element)
        }
        Value::Array(items) => {
            let elements = items
                .iter()
                .map(|item| TupleElement::required(value_type(solver, item, widening)))
                .collect();
            interner.readonly_tuple(elements)
        }
        Value::Object(map) => {
            let properties = map
                .iter()
                .map(|(key, item)| {
                    PropertyInfo::new(interner.intern_string(key), value_type(solver, item, widening))
                        .with_readonly(!widen)
                })
                .collect();
            interner.object(properties)
        }
    }
}

#[cfg(test)]
#[path = "../tests/infer_tests.rs"]
mod tests;
