//! Library types available to every session without declarations.
//!
//! Only the members that matter for relations and branding are modelled:
//! `Date` and `RegExp` get a handful of methods so they are structurally
//! distinct, `Promise<T>` and `PromiseLike<T>` expose a `then` whose
//! callback parameter carries `T`, and `Function` accepts anything callable.

use crate::intern::TypeInterner;
use crate::types::{ParamInfo, PropertyInfo, Signature, TypeId};

pub const DATE: &str = "Date";
pub const REGEXP: &str = "RegExp";
pub const FUNCTION: &str = "Function";
pub const PROMISE: &str = "Promise";
pub const PROMISE_LIKE: &str = "PromiseLike";

#[derive(Clone, Copy, Debug)]
pub struct Builtins {
    pub date: TypeId,
    pub regexp: TypeId,
    pub function: TypeId,
}

impl Builtins {
    pub fn install(interner: &TypeInterner) -> Self {
        let method = |name: &str, params: Vec<ParamInfo>, ret: TypeId| {
            PropertyInfo::new(
                interner.intern_string(name),
                interner.function(Signature::new(params, ret)),
            )
        };
        let param = |name: &str, type_id: TypeId| {
            ParamInfo::required(Some(interner.intern_string(name)), type_id)
        };

        let date_body = interner.object(vec![
            method("getTime", Vec::new(), TypeId::NUMBER),
            method("toISOString", Vec::new(), TypeId::STRING),
            method("valueOf", Vec::new(), TypeId::NUMBER),
        ]);
        let date = interner.named(DATE, Vec::new(), date_body, true);

        let regexp_body = interner.object(vec![
            PropertyInfo::new(interner.intern_string("source"), TypeId::STRING).with_readonly(true),
            PropertyInfo::new(interner.intern_string("flags"), TypeId::STRING).with_readonly(true),
            method("test", vec![param("string", TypeId::STRING)], TypeId::BOOLEAN),
        ]);
        let regexp = interner.named(REGEXP, Vec::new(), regexp_body, true);

        let function_body = interner.object(vec![
            PropertyInfo::new(interner.intern_string("length"), TypeId::NUMBER).with_readonly(true),
            PropertyInfo::new(interner.intern_string("name"), TypeId::STRING).with_readonly(true),
        ]);
        let function = interner.named(FUNCTION, Vec::new(), function_body, true);

        Builtins {
            date,
            regexp,
            function,
        }
    }

    /// `Promise<T>`
    pub fn promise(&self, interner: &TypeInterner, value: TypeId) -> TypeId {
        let then = then_property(interner, value);
        let on_rejected = optional_callback(interner, "onrejected", "reason", TypeId::ANY);
        let catch = PropertyInfo::new(
            interner.intern_string("catch"),
            interner.function(Signature::new(vec![on_rejected], TypeId::UNKNOWN)),
        );
        let on_finally = ParamInfo {
            name: Some(interner.intern_string("onfinally")),
            type_id: interner.function(Signature::new(Vec::new(), TypeId::VOID)),
            optional: true,
            rest: false,
        };
        let finally = PropertyInfo::new(
            interner.intern_string("finally"),
            interner.function(Signature::new(vec![on_finally], TypeId::UNKNOWN)),
        );
        let body = interner.object(vec![then, catch, finally]);
        interner.named(PROMISE, vec![value], body, true)
    }

    /// `PromiseLike<T>`
    pub fn promise_like(&self, interner: &TypeInterner, value: TypeId) -> TypeId {
        let body = interner.object(vec![then_property(interner, value)]);
        interner.named(PROMISE_LIKE, vec![value], body, true)
    }
}

fn optional_callback(
    interner: &TypeInterner,
    name: &str,
    value_name: &str,
    value: TypeId,
) -> ParamInfo {
    let callback = interner.function(Signature::new(
        vec![ParamInfo::required(
            Some(interner.intern_string(value_name)),
            value,
        )],
        TypeId::UNKNOWN,
    ));
    ParamInfo {
        name: Some(interner.intern_string(name)),
        type_id: callback,
        optional: true,
        rest: false,
    }
}

// then(onfulfilled?: (value: T) => unknown, onrejected?: (reason: any) => unknown): unknown
fn then_property(interner: &TypeInterner, value: TypeId) -> PropertyInfo {
    let on_fulfilled = optional_callback(interner, "onfulfilled", "value", value);
    let on_rejected = optional_callback(interner, "onrejected", "reason", TypeId::ANY);
    PropertyInfo::new(
        interner.intern_string("then"),
        interner.function(Signature::new(
            vec![on_fulfilled, on_rejected],
            TypeId::UNKNOWN,
        )),
    )
}
