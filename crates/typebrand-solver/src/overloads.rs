//! Overload extraction: a callable type as an ordered list of
//! `(parameters, return)` pairs.
//!
//! Enumeration is modelled on matching the callable against a pattern of
//! `N` call-signature slots. What a pattern match yields depends on the host
//! profile, so two strategies exist and one is picked per session by
//! probing a single-overload function.

use crate::operations::parameters_tuple;
use crate::solver::{HostProfile, OverloadStrategyChoice, Solver};
use crate::structure;
use crate::types::*;
use tracing::{debug, warn};
use typebrand_common::limits::MAX_OVERLOAD_SLOTS;

/// One overload: its parameter list as a tuple type, and its return type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct OverloadInfo {
    pub parameters: TypeId,
    pub return_type: TypeId,
}

impl OverloadInfo {
    pub fn from_signature(solver: &Solver, signature: &Signature) -> Self {
        OverloadInfo {
            parameters: parameters_tuple(solver, signature),
            return_type: signature.return_type,
        }
    }

    /// The filler a pattern slot takes when the callable has no signature
    /// for it: `{ parameters: unknown[], return: unknown }`.
    pub fn placeholder(solver: &Solver) -> Self {
        OverloadInfo {
            parameters: solver.interner().array(TypeId::UNKNOWN),
            return_type: TypeId::UNKNOWN,
        }
    }

    pub fn is_placeholder(&self, solver: &Solver) -> bool {
        *self == Self::placeholder(solver)
    }
}

pub trait OverloadStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Overloads of a signature list, in declaration order.
    fn extract(&self, solver: &Solver, signatures: &[Signature]) -> Vec<OverloadInfo>;
}

/// Match `signatures` against a pattern of `slots` call signatures.
///
/// `None` when the host can't match a pattern that wide. Only the last
/// `slots` signatures ever take part in a match.
pub fn match_slots(
    solver: &Solver,
    signatures: &[Signature],
    slots: usize,
) -> Option<Vec<OverloadInfo>> {
    let available = signatures.len();
    let matched = &signatures[available.saturating_sub(slots)..];
    let infos = matched.iter().map(|sig| OverloadInfo::from_signature(solver, sig));
    match solver.options().host_profile {
        HostProfile::Modern => {
            let padding = slots - matched.len();
            let placeholder = OverloadInfo::placeholder(solver);
            Some(std::iter::repeat_n(placeholder, padding).chain(infos).collect())
        }
        HostProfile::Legacy if slots <= available => Some(infos.collect()),
        HostProfile::Legacy => None,
    }
}

/// Drop placeholder slots. A callable whose only signature looks like a
/// placeholder (`(...args: unknown[]) => unknown`) keeps that signature.
fn patch_placeholders(
    solver: &Solver,
    signatures: &[Signature],
    matched: Vec<OverloadInfo>,
) -> Vec<OverloadInfo> {
    let real: Vec<OverloadInfo> = matched
        .into_iter()
        .filter(|info| !info.is_placeholder(solver))
        .collect();
    if !real.is_empty() {
        return real;
    }
    let start = signatures.len().saturating_sub(MAX_OVERLOAD_SLOTS);
    signatures[start..]
        .iter()
        .map(|sig| OverloadInfo::from_signature(solver, sig))
        .collect()
}

/// One match against the full-width pattern.
pub struct GenericExpansion;

impl OverloadStrategy for GenericExpansion {
    fn name(&self) -> &'static str {
        "generic-expansion"
    }

    fn extract(&self, solver: &Solver, signatures: &[Signature]) -> Vec<OverloadInfo> {
        match match_slots(solver, signatures, MAX_OVERLOAD_SLOTS) {
            Some(matched) => patch_placeholders(solver, signatures, matched),
            None => Vec::new(),
        }
    }
}

/// Try patterns from the widest down and keep the first that matches.
pub struct DecrementalMatch;

impl OverloadStrategy for DecrementalMatch {
    fn name(&self) -> &'static str {
        "decremental-match"
    }

    fn extract(&self, solver: &Solver, signatures: &[Signature]) -> Vec<OverloadInfo> {
        for slots in (1..=MAX_OVERLOAD_SLOTS).rev() {
            if let Some(matched) = match_slots(solver, signatures, slots) {
                return patch_placeholders(solver, signatures, matched);
            }
        }
        Vec::new()
    }
}

static GENERIC_EXPANSION: GenericExpansion = GenericExpansion;
static DECREMENTAL_MATCH: DecrementalMatch = DecrementalMatch;

/// Pick the strategy for a session. The probe `(a: 1) => 1` is matched
/// against the full-width pattern; if the host can do that, one match is
/// enough for every callable. `Fast` on a host that fails the probe falls
/// back to decremental matching.
pub fn select_strategy(solver: &Solver) -> &'static dyn OverloadStrategy {
    let strategy: &'static dyn OverloadStrategy = match solver.options().overload_strategy {
        OverloadStrategyChoice::Fallback => &DECREMENTAL_MATCH,
        OverloadStrategyChoice::Auto if expands_fully(solver) => &GENERIC_EXPANSION,
        OverloadStrategyChoice::Auto => &DECREMENTAL_MATCH,
        OverloadStrategyChoice::Fast if expands_fully(solver) => &GENERIC_EXPANSION,
        OverloadStrategyChoice::Fast => {
            warn!(
                host = ?solver.options().host_profile,
                "fast overload strategy needs full pattern expansion, using decremental matching"
            );
            &DECREMENTAL_MATCH
        }
    };
    debug!(
        strategy = strategy.name(),
        host = ?solver.options().host_profile,
        "selected overload strategy"
    );
    strategy
}

/// Whether the host matches a single-overload probe against every slot of
/// the widest pattern.
fn expands_fully(solver: &Solver) -> bool {
    let interner = solver.interner();
    let one = interner.literal_number(1.0);
    let probe = Signature::new(
        vec![ParamInfo::required(Some(interner.intern_string("a")), one)],
        one,
    );
    match_slots(solver, &[probe], MAX_OVERLOAD_SLOTS)
        .is_some_and(|slots| slots.len() == MAX_OVERLOAD_SLOTS)
}

/// Call overloads of `type_id` in declaration order, at most
/// `MAX_OVERLOAD_SLOTS` (the last ones win).
pub fn overloads_info(solver: &Solver, type_id: TypeId) -> Vec<OverloadInfo> {
    let signatures = structure::call_signatures(solver, type_id);
    solver.overload_strategy().extract(solver, &signatures)
}

/// Construct overloads; `return_type` is the instance type.
pub fn constructor_overloads_info(solver: &Solver, type_id: TypeId) -> Vec<OverloadInfo> {
    let signatures = structure::construct_signatures(solver, type_id);
    solver.overload_strategy().extract(solver, &signatures)
}

/// Union of the parameter tuples of every overload.
pub fn overload_parameters(solver: &Solver, type_id: TypeId) -> TypeId {
    let infos = overloads_info(solver, type_id);
    solver
        .interner()
        .union(infos.iter().map(|info| info.parameters).collect())
}

/// Union of the return types of every overload.
pub fn overload_return_types(solver: &Solver, type_id: TypeId) -> TypeId {
    let infos = overloads_info(solver, type_id);
    solver
        .interner()
        .union(infos.iter().map(|info| info.return_type).collect())
}

/// Returns of the overloads whose parameter list accepts `args`; `never`
/// when none does.
pub fn overload_return_type_for_parameters(
    solver: &Solver,
    type_id: TypeId,
    args: TypeId,
) -> TypeId {
    let returns = overloads_info(solver, type_id)
        .into_iter()
        .filter(|info| solver.is_assignable(args, info.parameters))
        .map(|info| info.return_type)
        .collect();
    solver.interner().union(returns)
}

pub fn constructor_overload_parameters(solver: &Solver, type_id: TypeId) -> TypeId {
    let infos = constructor_overloads_info(solver, type_id);
    solver
        .interner()
        .union(infos.iter().map(|info| info.parameters).collect())
}

#[cfg(test)]
#[path = "../tests/overloads_tests.rs"]
mod tests;
