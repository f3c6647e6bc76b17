//! The solver session: interner, library types, options and query caches.

use crate::brand::Brand;
use crate::builtins::Builtins;
use crate::equality::Sensitivity;
use crate::intern::TypeInterner;
use crate::overloads::{self, OverloadStrategy};
use crate::relation::SubtypeChecker;
use crate::types::TypeId;
use dashmap::DashMap;
use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, OnceLock};
use tracing::{debug, trace};
use typebrand_common::limits::MAX_BRAND_DEPTH;

/// Which overload-enumeration capability the host relation is modelled on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HostProfile {
    /// Any callable matches a call-signature pattern of any width; missing
    /// slots are padded with placeholder signatures.
    #[default]
    Modern,
    /// A pattern only matches callables with at least as many signatures.
    Legacy,
}

/// How the overload extraction strategy is chosen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OverloadStrategyChoice {
    /// Probe the host once and pick the fastest strategy that works.
    #[default]
    Auto,
    Fast,
    Fallback,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SolverOptions {
    pub host_profile: HostProfile,
    pub overload_strategy: OverloadStrategyChoice,
    pub brand_depth_limit: u32,
}

impl Default for SolverOptions {
    fn default() -> Self {
        SolverOptions {
            host_profile: HostProfile::default(),
            overload_strategy: OverloadStrategyChoice::default(),
            brand_depth_limit: MAX_BRAND_DEPTH,
        }
    }
}

/// Named types that brand atomically instead of structurally.
#[derive(Clone, Debug, Default)]
pub struct NominalRegistry {
    entries: IndexMap<String, TypeId>,
}

impl NominalRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, type_id: TypeId) {
        self.entries.insert(name.into(), type_id);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, TypeId)> {
        self.entries.iter().map(|(name, &id)| (name.as_str(), id))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Memoized query results, shared by every layer.
#[derive(Default)]
pub struct QueryCache {
    relation: DashMap<(TypeId, TypeId), bool, FxBuildHasher>,
    brands: DashMap<TypeId, Arc<Brand>, FxBuildHasher>,
    sensitivity: DashMap<TypeId, Sensitivity, FxBuildHasher>,
}

impl QueryCache {
    pub fn clear(&self) {
        self.relation.clear();
        self.brands.clear();
        self.sensitivity.clear();
    }

    pub fn relation_len(&self) -> usize {
        self.relation.len()
    }

    pub fn brand_len(&self) -> usize {
        self.brands.len()
    }

    pub(crate) fn brand(&self, type_id: TypeId) -> Option<Arc<Brand>> {
        self.brands.get(&type_id).map(|entry| entry.value().clone())
    }

    pub(crate) fn insert_brand(&self, type_id: TypeId, brand: Arc<Brand>) {
        self.brands.insert(type_id, brand);
    }

    pub(crate) fn sensitivity(&self, type_id: TypeId) -> Option<Sensitivity> {
        self.sensitivity.get(&type_id).map(|entry| *entry.value())
    }

    pub(crate) fn insert_sensitivity(&self, type_id: TypeId, flags: Sensitivity) {
        self.sensitivity.insert(type_id, flags);
    }
}

/// A type-checking session.
///
/// All layers are free functions over `&Solver`; the solver owns the
/// interner so every `TypeId` they see comes from the same table.
pub struct Solver {
    interner: TypeInterner,
    builtins: Builtins,
    options: SolverOptions,
    nominal: NominalRegistry,
    cache: QueryCache,
    strategy: OnceLock<&'static dyn OverloadStrategy>,
    any_probe: TypeId,
}

impl Solver {
    pub fn new() -> Self {
        Self::with_options(SolverOptions::default())
    }

    pub fn with_options(options: SolverOptions) -> Self {
        let interner = TypeInterner::new();
        let builtins = Builtins::install(&interner);
        let any_probe = interner.unique_symbol("__anyProbe");
        let mut nominal = NominalRegistry::new();
        nominal.insert("Date", builtins.date);
        Solver {
            interner,
            builtins,
            options,
            nominal,
            cache: QueryCache::default(),
            strategy: OnceLock::new(),
            any_probe,
        }
    }

    #[inline]
    pub fn interner(&self) -> &TypeInterner {
        &self.interner
    }

    #[inline]
    pub fn builtins(&self) -> &Builtins {
        &self.builtins
    }

    #[inline]
    pub fn options(&self) -> &SolverOptions {
        &self.options
    }

    #[inline]
    pub fn nominal_types(&self) -> &NominalRegistry {
        &self.nominal
    }

    /// Replace the nominal registry. Cached brands depend on it and are dropped.
    pub fn set_nominal_types(&mut self, registry: NominalRegistry) {
        debug!(entries = registry.len(), "replacing nominal type registry");
        self.nominal = registry;
        self.cache.brands.clear();
    }

    #[inline]
    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    /// A fresh `unique symbol` that only `any` is mutually assignable with.
    #[inline]
    pub fn any_probe(&self) -> TypeId {
        self.any_probe
    }

    /// Native assignability: is `source` assignable to `target`?
    pub fn is_assignable(&self, source: TypeId, target: TypeId) -> bool {
        if source == target {
            return true;
        }
        let key = (source, target);
        if let Some(cached) = self.cache.relation.get(&key) {
            return *cached;
        }
        let mut checker = SubtypeChecker::new(self);
        let result = checker.is_assignable(source, target);
        trace!(source = source.0, target = target.0, result, "is_assignable");
        if !checker.is_exceeded() {
            self.cache.relation.insert(key, result);
        }
        result
    }

    /// Mutual native assignability.
    pub fn is_mutually_assignable(&self, left: TypeId, right: TypeId) -> bool {
        self.is_assignable(left, right) && self.is_assignable(right, left)
    }

    /// The overload extraction strategy, chosen once per session.
    pub fn overload_strategy(&self) -> &'static dyn OverloadStrategy {
        *self
            .strategy
            .get_or_init(|| overloads::select_strategy(self))
    }
}

impl Default for Solver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../tests/solver_tests.rs"]
mod tests;
