//! The assertion chain.
//!
//! A chain holds a subject type and two modes: its polarity (a type
//! parameter, so `.not()` can only be called once) and whether equality is
//! decided by branding alone. Accessors navigate to a derived subject and
//! return a new chain; terminals decide pass or fail.
//!
//! An accessor that does not apply to the subject, such as `.returns()` on
//! a string, produces a *vacuous* chain. Every terminal on a vacuous chain
//! passes, whatever the polarity.

use crate::failure::{ExpectationFailure, FailureKind, MismatchReport};
use crate::session::TypeSession;
use serde_json::Value;
use std::fmt;
use std::marker::PhantomData;
use tracing::debug;
use typebrand_solver::equality::{
    extends, extends_using_branding, strict_equal, strict_equal_using_branding,
};
use typebrand_solver::mismatch::mismatch_info;
use typebrand_solver::overloads::{self, OverloadInfo};
use typebrand_solver::print::print_type;
use typebrand_solver::recursion::{DepthCounter, RecursionProfile};
use typebrand_solver::structure::{self, members_of};
use typebrand_solver::types::{ParamInfo, PropertyInfo, Signature, TupleElement};
use typebrand_solver::{LowerError, MismatchInfo, Solver, TypeId, operations, special};

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::Positive {}
    impl Sealed for super::Negative {}
}

/// Whether terminals assert or deny.
pub trait Polarity: sealed::Sealed + Copy + fmt::Debug + 'static {
    const POSITIVE: bool;
}

#[derive(Clone, Copy, Debug)]
pub struct Positive;

#[derive(Clone, Copy, Debug)]
pub struct Negative;

impl Polarity for Positive {
    const POSITIVE: bool = true;
}

impl Polarity for Negative {
    const POSITIVE: bool = false;
}

/// Anything a terminal can compare against: a `TypeId`, type source text,
/// or a JSON value (widened).
pub trait TypeArg {
    fn resolve(&self, session: &TypeSession) -> Result<TypeId, LowerError>;
}

impl TypeArg for TypeId {
    fn resolve(&self, _session: &TypeSession) -> Result<TypeId, LowerError> {
        Ok(*self)
    }
}

impl TypeArg for str {
    fn resolve(&self, session: &TypeSession) -> Result<TypeId, LowerError> {
        session.lower(self)
    }
}

impl TypeArg for String {
    fn resolve(&self, session: &TypeSession) -> Result<TypeId, LowerError> {
        session.lower(self)
    }
}

impl TypeArg for Value {
    fn resolve(&self, session: &TypeSession) -> Result<TypeId, LowerError> {
        Ok(session.value_type(self))
    }
}

impl<T: TypeArg + ?Sized> TypeArg for &T {
    fn resolve(&self, session: &TypeSession) -> Result<TypeId, LowerError> {
        (**self).resolve(session)
    }
}

/// Start a chain on an explicit type.
pub fn expect_type_of(session: &TypeSession, subject: TypeId) -> ExpectTypeOf<'_, Positive> {
    ExpectTypeOf {
        session,
        subject,
        branded: false,
        vacuous: false,
        polarity: PhantomData,
    }
}

/// Start a chain on the widened type of a value.
pub fn expect_type_of_value<'s>(session: &'s TypeSession, value: &Value) -> ExpectTypeOf<'s, Positive> {
    expect_type_of(session, session.value_type(value))
}

/// Start a chain on a type written as source text.
pub fn expect_type_of_source<'s>(
    session: &'s TypeSession,
    source: &str,
) -> Result<ExpectTypeOf<'s, Positive>, LowerError> {
    Ok(expect_type_of(session, session.lower(source)?))
}

pub struct ExpectTypeOf<'s, P: Polarity = Positive> {
    session: &'s TypeSession,
    subject: TypeId,
    branded: bool,
    vacuous: bool,
    polarity: PhantomData<P>,
}

impl<P: Polarity> Clone for ExpectTypeOf<'_, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: Polarity> Copy for ExpectTypeOf<'_, P> {}

impl<P: Polarity> fmt::Debug for ExpectTypeOf<'_, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpectTypeOf")
            .field("subject", &self.session.format(self.subject))
            .field("positive", &P::POSITIVE)
            .field("branded", &self.branded)
            .field("vacuous", &self.vacuous)
            .finish()
    }
}

impl<'s> ExpectTypeOf<'s, Positive> {
    /// Negate every terminal that follows.
    ///
    /// There is no `.not()` on a negated chain:
    ///
    /// ```compile_fail
    /// use typebrand_expect::{TypeId, TypeSession, expect_type_of};
    ///
    /// let session = TypeSession::new();
    /// let _ = expect_type_of(&session, TypeId::STRING).not().not();
    /// ```
    pub fn not(&self) -> ExpectTypeOf<'s, Negative> {
        ExpectTypeOf {
            session: self.session,
            subject: self.subject,
            branded: self.branded,
            vacuous: self.vacuous,
            polarity: PhantomData,
        }
    }

    /// Navigate to property `key`. Fails when an object-like subject has no
    /// such property.
    pub fn to_have_property(&self, key: &str) -> Result<Self, ExpectationFailure> {
        if self.vacuous {
            return Ok(*self);
        }
        let solver = self.solver();
        if special::is_any(solver, self.subject) {
            return Ok(self.derive(TypeId::ANY));
        }
        if members_of(solver, self.subject).is_none() {
            return Ok(self.vacuous("toHaveProperty"));
        }
        let name = solver.interner().intern_string(key);
        match structure::property_read_type(solver, self.subject, name) {
            Some(value) => Ok(self.derive(value)),
            None => Err(self.failure(
                FailureKind::Mismatch,
                "toHaveProperty",
                format!("property `{key}` does not exist on the subject"),
                Some(key.to_string()),
                None,
            )),
        }
    }
}

impl ExpectTypeOf<'_, Negative> {
    /// Fails when the subject has property `key`.
    pub fn to_have_property(&self, key: &str) -> Result<(), ExpectationFailure> {
        if self.vacuous {
            return Ok(());
        }
        let solver = self.solver();
        let present = special::is_any(solver, self.subject)
            || members_of(solver, self.subject).is_some_and(|_| {
                let name = solver.interner().intern_string(key);
                structure::property_read_type(solver, self.subject, name).is_some()
            });
        if present {
            return Err(self.failure(
                FailureKind::Negated,
                "toHaveProperty",
                format!("expected property `{key}` not to exist on the subject"),
                Some(key.to_string()),
                None,
            ));
        }
        Ok(())
    }
}

impl<'s, P: Polarity> ExpectTypeOf<'s, P> {
    #[inline]
    pub fn subject(&self) -> TypeId {
        self.subject
    }

    #[inline]
    pub fn is_vacuous(&self) -> bool {
        self.vacuous
    }

    #[inline]
    pub fn is_branded(&self) -> bool {
        self.branded
    }

    #[inline]
    pub fn is_positive(&self) -> bool {
        P::POSITIVE
    }

    /// Decide equality by deep branding only, and extension by the native
    /// relation plus a brand match over the expected type's keys.
    pub fn branded(&self) -> Self {
        ExpectTypeOf {
            branded: true,
            ..*self
        }
    }

    fn solver(&self) -> &'s Solver {
        self.session.solver()
    }

    fn derive(&self, subject: TypeId) -> Self {
        ExpectTypeOf { subject, ..*self }
    }

    fn vacuous(&self, accessor: &'static str) -> Self {
        debug!(
            accessor,
            subject = %self.session.format(self.subject),
            "accessor does not apply to the subject, chain is vacuous"
        );
        ExpectTypeOf {
            subject: TypeId::NEVER,
            vacuous: true,
            ..*self
        }
    }

    /// Shared accessor plumbing: vacuous chains stay vacuous, `any` stays
    /// `any`, and `None` from `navigate` makes the chain vacuous.
    fn navigate(
        &self,
        accessor: &'static str,
        navigate: impl FnOnce(&'s Solver, TypeId) -> Option<TypeId>,
    ) -> Self {
        if self.vacuous {
            return *self;
        }
        let solver = self.solver();
        if special::is_any(solver, self.subject) {
            return self.derive(TypeId::ANY);
        }
        match navigate(solver, self.subject) {
            Some(subject) => self.derive(subject),
            None => self.vacuous(accessor),
        }
    }

    /// Parameter `index` across every overload.
    pub fn parameter(&self, index: usize) -> Self {
        self.navigate("parameter", |solver, subject| {
            let types: Vec<TypeId> = overloads::overloads_info(solver, subject)
                .iter()
                .filter_map(|info| tuple_element_at(solver, info.parameters, index))
                .collect();
            (!types.is_empty()).then(|| solver.interner().union(types))
        })
    }

    /// Union of the parameter tuples of every overload.
    pub fn parameters(&self) -> Self {
        self.navigate("parameters", |solver, subject| {
            let infos = overloads::overloads_info(solver, subject);
            union_of(solver, &infos, |info| info.parameters)
        })
    }

    /// Union of the return types of every overload.
    pub fn returns(&self) -> Self {
        self.navigate("returns", |solver, subject| {
            let infos = overloads::overloads_info(solver, subject);
            union_of(solver, &infos, |info| info.return_type)
        })
    }

    /// The value a promise or thenable resolves to.
    pub fn resolves(&self) -> Self {
        self.navigate("resolves", operations::promise_value_type)
    }

    /// Element type of an array, or the union of a tuple's elements.
    pub fn items(&self) -> Self {
        self.navigate("items", |solver, subject| {
            if !structure::is_array_like(solver, subject) {
                return None;
            }
            members_of(solver, subject)?
                .number_index
                .map(|index| index.value_type)
        })
    }

    /// What `new` produces.
    pub fn instance(&self) -> Self {
        self.navigate("instance", |solver, subject| {
            if structure::construct_signatures(solver, subject).is_empty() {
                return None;
            }
            operations::instance_type(solver, subject)
        })
    }

    /// Union of the parameter tuples of every construct signature.
    pub fn constructor_parameters(&self) -> Self {
        self.navigate("constructorParameters", |solver, subject| {
            let infos = overloads::constructor_overloads_info(solver, subject);
            union_of(solver, &infos, |info| info.parameters)
        })
    }

    /// The declared `this` type, `unknown` when there is none.
    pub fn this_parameter(&self) -> Self {
        self.navigate("thisParameter", |solver, subject| {
            if structure::call_signatures(solver, subject).is_empty() {
                return None;
            }
            Some(operations::this_parameter_type(solver, subject))
        })
    }

    /// The narrowed type of a `x is T` type guard.
    pub fn guards(&self) -> Self {
        self.navigate("guards", |solver, subject| {
            let predicate = structure::call_signatures(solver, subject)
                .last()?
                .type_predicate?;
            if predicate.asserts {
                return None;
            }
            predicate.type_id
        })
    }

    /// The asserted type of an `asserts x is T` function.
    pub fn asserts(&self) -> Self {
        self.navigate("asserts", |solver, subject| {
            let predicate = structure::call_signatures(solver, subject)
                .last()?
                .type_predicate?;
            if !predicate.asserts {
                return None;
            }
            predicate.type_id
        })
    }

    /// `Extract<Subject, V>`
    pub fn extract(&self, extracted: impl TypeArg) -> Result<Self, ExpectationFailure> {
        let extracted = self.resolve("extract", extracted)?;
        Ok(self.navigate("extract", |solver, subject| {
            Some(operations::extract(solver, subject, extracted))
        }))
    }

    /// `Exclude<Subject, V>`
    pub fn exclude(&self, excluded: impl TypeArg) -> Result<Self, ExpectationFailure> {
        let excluded = self.resolve("exclude", excluded)?;
        Ok(self.navigate("exclude", |solver, subject| {
            Some(operations::exclude(solver, subject, excluded))
        }))
    }

    /// Strict equality with `expected`.
    pub fn to_equal_type_of(&self, expected: impl TypeArg) -> Result<(), ExpectationFailure> {
        self.assert_equal("toEqualTypeOf", expected)
    }

    /// Same check as [`to_equal_type_of`](Self::to_equal_type_of).
    pub fn to_be_identical_to(&self, expected: impl TypeArg) -> Result<(), ExpectationFailure> {
        self.assert_equal("toBeIdenticalTo", expected)
    }

    /// The subject extends `expected`; extra properties are allowed.
    pub fn to_match_type_of(&self, expected: impl TypeArg) -> Result<(), ExpectationFailure> {
        self.assert_extends("toMatchTypeOf", expected)
    }

    /// Same check as [`to_match_type_of`](Self::to_match_type_of).
    pub fn to_extend(&self, expected: impl TypeArg) -> Result<(), ExpectationFailure> {
        self.assert_extends("toExtend", expected)
    }

    /// The properties `expected` names, picked from the subject (nested
    /// objects included), strictly equal `expected`.
    pub fn to_match_object_type(&self, expected: impl TypeArg) -> Result<(), ExpectationFailure> {
        const ASSERTION: &str = "toMatchObjectType";
        let expected = self.resolve(ASSERTION, expected)?;
        let solver = self.solver();
        if !is_plain_object(solver, expected) {
            return Err(self.failure(
                FailureKind::InvalidType,
                ASSERTION,
                "only object types can be matched".to_string(),
                Some(self.session.format(expected)),
                None,
            ));
        }
        if self.vacuous {
            return Ok(());
        }
        let mut depth = DepthCounter::with_profile(RecursionProfile::Mismatch);
        let picked = pick_matching(solver, self.subject, expected, &mut depth);
        let holds = self.equal(picked, expected);
        self.decide(
            ASSERTION,
            holds,
            expected,
            || mismatch_info(solver, picked, expected),
            "the matching properties are not equal",
            "expected the matching properties to differ",
        )
    }

    pub fn to_be_any(&self) -> Result<(), ExpectationFailure> {
        self.assert_kind("toBeAny", "any", special::is_any)
    }

    pub fn to_be_unknown(&self) -> Result<(), ExpectationFailure> {
        self.assert_kind("toBeUnknown", "unknown", special::is_unknown)
    }

    pub fn to_be_never(&self) -> Result<(), ExpectationFailure> {
        self.assert_kind("toBeNever", "never", special::is_never)
    }

    pub fn to_be_function(&self) -> Result<(), ExpectationFailure> {
        self.assert_kind("toBeFunction", "function", |solver, subject| {
            extends(solver, subject, any_function(solver))
        })
    }

    pub fn to_be_object(&self) -> Result<(), ExpectationFailure> {
        self.assert_extends_kind("toBeObject", "object", TypeId::OBJECT)
    }

    pub fn to_be_array(&self) -> Result<(), ExpectationFailure> {
        self.assert_kind("toBeArray", "array", |solver, subject| {
            extends(solver, subject, solver.interner().array(TypeId::ANY))
        })
    }

    pub fn to_be_string(&self) -> Result<(), ExpectationFailure> {
        self.assert_extends_kind("toBeString", "string", TypeId::STRING)
    }

    pub fn to_be_number(&self) -> Result<(), ExpectationFailure> {
        self.assert_extends_kind("toBeNumber", "number", TypeId::NUMBER)
    }

    pub fn to_be_boolean(&self) -> Result<(), ExpectationFailure> {
        self.assert_extends_kind("toBeBoolean", "boolean", TypeId::BOOLEAN)
    }

    pub fn to_be_void(&self) -> Result<(), ExpectationFailure> {
        self.assert_extends_kind("toBeVoid", "void", TypeId::VOID)
    }

    pub fn to_be_symbol(&self) -> Result<(), ExpectationFailure> {
        self.assert_extends_kind("toBeSymbol", "symbol", TypeId::SYMBOL)
    }

    pub fn to_be_null(&self) -> Result<(), ExpectationFailure> {
        self.assert_extends_kind("toBeNull", "null", TypeId::NULL)
    }

    pub fn to_be_undefined(&self) -> Result<(), ExpectationFailure> {
        self.assert_extends_kind("toBeUndefined", "undefined", TypeId::UNDEFINED)
    }

    pub fn to_be_bigint(&self) -> Result<(), ExpectationFailure> {
        self.assert_extends_kind("toBeBigInt", "bigint", TypeId::BIGINT)
    }

    /// `null` or `undefined` is part of the subject.
    pub fn to_be_nullable(&self) -> Result<(), ExpectationFailure> {
        self.assert_kind("toBeNullable", "nullable", |solver, subject| {
            !extends(solver, subject, operations::non_nullable(solver, subject))
        })
    }

    /// Some overload accepts `args`.
    pub fn to_be_callable_with<A: TypeArg>(&self, args: &[A]) -> Result<(), ExpectationFailure> {
        self.assert_accepts("toBeCallableWith", args, overloads::overload_parameters)
    }

    /// Some construct signature accepts `args`.
    pub fn to_be_constructible_with<A: TypeArg>(
        &self,
        args: &[A],
    ) -> Result<(), ExpectationFailure> {
        self.assert_accepts(
            "toBeConstructibleWith",
            args,
            overloads::constructor_overload_parameters,
        )
    }

    fn equal(&self, left: TypeId, right: TypeId) -> bool {
        if self.branded {
            strict_equal_using_branding(self.solver(), left, right)
        } else {
            strict_equal(self.solver(), left, right)
        }
    }

    fn assert_equal(
        &self,
        assertion: &'static str,
        expected: impl TypeArg,
    ) -> Result<(), ExpectationFailure> {
        let expected = self.resolve(assertion, expected)?;
        if self.vacuous {
            return Ok(());
        }
        let solver = self.solver();
        let holds = self.equal(self.subject, expected);
        self.decide(
            assertion,
            holds,
            expected,
            || mismatch_info(solver, self.subject, expected),
            "types are not equal",
            "expected types to differ",
        )
    }

    fn assert_extends(
        &self,
        assertion: &'static str,
        expected: impl TypeArg,
    ) -> Result<(), ExpectationFailure> {
        let expected = self.resolve(assertion, expected)?;
        if self.vacuous {
            return Ok(());
        }
        let solver = self.solver();
        let holds = if self.branded {
            extends_using_branding(solver, self.subject, expected)
        } else {
            extends(solver, self.subject, expected)
        };
        self.decide(
            assertion,
            holds,
            expected,
            || mismatch_info(solver, self.subject, expected),
            "the subject does not extend the expected type",
            "expected the subject not to extend the expected type",
        )
    }

    fn assert_extends_kind(
        &self,
        assertion: &'static str,
        kind: &str,
        target: TypeId,
    ) -> Result<(), ExpectationFailure> {
        self.assert_kind(assertion, kind, |solver, subject| {
            extends(solver, subject, target)
        })
    }

    fn assert_kind(
        &self,
        assertion: &'static str,
        kind: &str,
        holds: impl FnOnce(&Solver, TypeId) -> bool,
    ) -> Result<(), ExpectationFailure> {
        if self.vacuous {
            return Ok(());
        }
        let solver = self.solver();
        let holds = holds(solver, self.subject);
        match (P::POSITIVE, holds) {
            (true, true) | (false, false) => Ok(()),
            (true, false) => {
                let actual = print_type(solver, self.subject).unwrap_or_else(|| "any".to_string());
                Err(self.failure(
                    FailureKind::Mismatch,
                    assertion,
                    format!("the subject is not {kind}"),
                    Some(kind.to_string()),
                    Some(MismatchReport::Message(format!(
                        "Expected: {kind}, Actual: {actual}"
                    ))),
                ))
            }
            (false, true) => Err(self.failure(
                FailureKind::Negated,
                assertion,
                format!("expected the subject not to be {kind}"),
                Some(kind.to_string()),
                None,
            )),
        }
    }

    fn assert_accepts<A: TypeArg>(
        &self,
        assertion: &'static str,
        args: &[A],
        parameters: impl FnOnce(&Solver, TypeId) -> TypeId,
    ) -> Result<(), ExpectationFailure> {
        let mut elements = Vec::with_capacity(args.len());
        for arg in args {
            elements.push(TupleElement::required(self.resolve(assertion, arg)?));
        }
        if self.vacuous {
            return Ok(());
        }
        let solver = self.solver();
        let args = solver.interner().tuple(elements);
        let accepted = parameters(solver, self.subject);
        let holds = special::is_any(solver, self.subject) || solver.is_assignable(args, accepted);
        let args_text = self.session.format(args);
        match (P::POSITIVE, holds) {
            (true, true) | (false, false) => Ok(()),
            (true, false) => Err(self.failure(
                FailureKind::Mismatch,
                assertion,
                format!("no signature accepts the arguments {args_text}"),
                Some(self.session.format(accepted)),
                None,
            )),
            (false, true) => Err(self.failure(
                FailureKind::Negated,
                assertion,
                format!("expected no signature to accept the arguments {args_text}"),
                Some(self.session.format(accepted)),
                None,
            )),
        }
    }

    fn decide(
        &self,
        assertion: &'static str,
        holds: bool,
        expected: TypeId,
        mismatch: impl FnOnce() -> MismatchInfo,
        message: &str,
        negated_message: &str,
    ) -> Result<(), ExpectationFailure> {
        match (P::POSITIVE, holds) {
            (true, true) | (false, false) => Ok(()),
            (true, false) => {
                let report = MismatchReport::from_info(self.solver(), &mismatch());
                Err(self.failure(
                    FailureKind::Mismatch,
                    assertion,
                    message.to_string(),
                    Some(self.session.format(expected)),
                    Some(report),
                ))
            }
            (false, true) => Err(self.failure(
                FailureKind::Negated,
                assertion,
                negated_message.to_string(),
                Some(self.session.format(expected)),
                None,
            )),
        }
    }

    fn resolve(
        &self,
        assertion: &'static str,
        arg: impl TypeArg,
    ) -> Result<TypeId, ExpectationFailure> {
        arg.resolve(self.session).map_err(|err| {
            self.failure(FailureKind::InvalidType, assertion, err.to_string(), None, None)
        })
    }

    fn failure(
        &self,
        kind: FailureKind,
        assertion: &'static str,
        message: String,
        expected: Option<String>,
        mismatch: Option<MismatchReport>,
    ) -> ExpectationFailure {
        debug!(assertion, ?kind, %message, "assertion failed");
        ExpectationFailure {
            kind,
            assertion,
            actual: self.session.format(self.subject),
            expected,
            message,
            mismatch,
        }
    }
}

fn union_of(
    solver: &Solver,
    infos: &[OverloadInfo],
    project: impl Fn(&OverloadInfo) -> TypeId,
) -> Option<TypeId> {
    if infos.is_empty() {
        return None;
    }
    Some(solver.interner().union(infos.iter().map(project).collect()))
}

/// The type at position `index` of a parameter tuple.
fn tuple_element_at(solver: &Solver, tuple: TypeId, index: usize) -> Option<TypeId> {
    if let Some(element) = structure::array_element_type(solver, tuple) {
        return Some(element);
    }
    let (elements, _) = structure::tuple_elements(solver, tuple)?;
    for (position, element) in elements.iter().enumerate() {
        if element.rest {
            return Some(structure::rest_element_type(solver, element.type_id));
        }
        if position == index {
            return Some(if element.optional {
                solver.interner().union2(element.type_id, TypeId::UNDEFINED)
            } else {
                element.type_id
            });
        }
    }
    None
}

/// `(...args: any[]) => any`
fn any_function(solver: &Solver) -> TypeId {
    let interner = solver.interner();
    let args = ParamInfo {
        name: Some(interner.intern_string("args")),
        type_id: interner.array(TypeId::ANY),
        optional: false,
        rest: true,
    };
    interner.function(Signature::new(vec![args], TypeId::ANY))
}

/// Objects without signatures; arrays, functions and primitives are leaves
/// for object matching.
fn is_plain_object(solver: &Solver, type_id: TypeId) -> bool {
    if special::special_kind(solver, type_id).is_some()
        || structure::is_primitive(solver, type_id)
        || structure::is_array_like(solver, type_id)
    {
        return false;
    }
    members_of(solver, type_id).is_some_and(|members| {
        members.call_signatures.is_empty() && members.construct_signatures.is_empty()
    })
}

/// The properties of `actual` named by `expected`, recursing where both
/// sides are plain objects.
fn pick_matching(
    solver: &Solver,
    actual: TypeId,
    expected: TypeId,
    depth: &mut DepthCounter,
) -> TypeId {
    if !is_plain_object(solver, actual) || !is_plain_object(solver, expected) {
        return actual;
    }
    let (Some(actual_members), Some(expected_members)) =
        (members_of(solver, actual), members_of(solver, expected))
    else {
        return actual;
    };
    if !depth.enter() {
        return actual;
    }
    let properties: Vec<PropertyInfo> = expected_members
        .properties
        .iter()
        .filter_map(|wanted| {
            let mut picked = *actual_members.property(wanted.name)?;
            picked.type_id = pick_matching(solver, picked.type_id, wanted.type_id, depth);
            Some(picked)
        })
        .collect();
    depth.leave();
    solver.interner().object(properties)
}

#[cfg(test)]
#[path = "../tests/chain_tests.rs"]
mod tests;
