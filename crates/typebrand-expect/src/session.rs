//! A type session: solver, declarations and options in one place.

use crate::infer::{Widening, value_type};
use crate::options::ExpectOptions;
use serde_json::Value;
use tracing::debug;
use typebrand_solver::{
    LowerError, NominalRegistry, Solver, TypeEnv, TypeId, declare_source, format_type,
    lower_type_source,
};

/// Owns everything an assertion needs. Assertions borrow the session, so
/// all of them see the same interner and caches.
pub struct TypeSession {
    solver: Solver,
    env: TypeEnv,
    options: ExpectOptions,
}

impl TypeSession {
    pub fn new() -> Self {
        TypeSession {
            solver: Solver::new(),
            env: TypeEnv::new(),
            options: ExpectOptions::default(),
        }
    }

    /// Build a session; nominal type expressions are lowered against the
    /// library types only.
    pub fn with_options(options: ExpectOptions) -> Result<Self, LowerError> {
        let mut solver = Solver::with_options(options.solver_options());
        let env = TypeEnv::new();
        let mut registry = NominalRegistry::new();
        for (name, source) in &options.nominal_types {
            registry.insert(name.clone(), lower_type_source(&solver, &env, source)?);
        }
        solver.set_nominal_types(registry);
        Ok(TypeSession {
            solver,
            env,
            options,
        })
    }

    #[inline]
    pub fn solver(&self) -> &Solver {
        &self.solver
    }

    #[inline]
    pub fn env(&self) -> &TypeEnv {
        &self.env
    }

    #[inline]
    pub fn options(&self) -> &ExpectOptions {
        &self.options
    }

    /// Add the declarations in `source`: type aliases, interfaces,
    /// `declare function` and `declare const`. Returns the declared names.
    pub fn declare(&mut self, source: &str) -> Result<Vec<String>, LowerError> {
        let names = declare_source(&self.solver, &mut self.env, source)?;
        debug!(?names, "declared");
        Ok(names)
    }

    /// The type written in `source`, resolved against the declarations.
    pub fn lower(&self, source: &str) -> Result<TypeId, LowerError> {
        lower_type_source(&self.solver, &self.env, source)
    }

    /// The widened type of a JSON value.
    pub fn value_type(&self, value: &Value) -> TypeId {
        value_type(&self.solver, value, Widening::Widen)
    }

    pub fn const_value_type(&self, value: &Value) -> TypeId {
        value_type(&self.solver, value, Widening::Const)
    }

    /// Brand `source` atomically under `name` from now on.
    pub fn register_nominal(&mut self, name: &str, source: &str) -> Result<(), LowerError> {
        let type_id = self.lower(source)?;
        let mut registry = self.solver.nominal_types().clone();
        registry.insert(name, type_id);
        self.solver.set_nominal_types(registry);
        self.options
            .nominal_types
            .insert(name.to_string(), source.to_string());
        Ok(())
    }

    pub fn format(&self, type_id: TypeId) -> String {
        format_type(&self.solver, type_id)
    }
}

impl Default for TypeSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../tests/session_tests.rs"]
mod tests;
