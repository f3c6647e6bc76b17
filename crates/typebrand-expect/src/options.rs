//! Assertion options, usually loaded from `typebrand.json`.

use anyhow::{Context, Result, bail};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use typebrand_common::limits::MAX_BRAND_DEPTH;
use typebrand_solver::{HostProfile, OverloadStrategyChoice, SolverOptions};

/// Options for a [`TypeSession`](crate::TypeSession).
///
/// ```json
/// {
///   "nominalTypes": { "Date": "Date", "UserId": "string & { __id: true }" },
///   "hostProfile": "legacy",
///   "overloadStrategy": "auto",
///   "brandDepthLimit": 64
/// }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExpectOptions {
    /// Name to type expression. Types mutually assignable with exactly one
    /// entry brand by name instead of by structure.
    pub nominal_types: IndexMap<String, String>,
    pub host_profile: HostProfile,
    pub overload_strategy: OverloadStrategyChoice,
    pub brand_depth_limit: u32,
}

impl Default for ExpectOptions {
    fn default() -> Self {
        let mut nominal_types = IndexMap::new();
        nominal_types.insert("Date".to_string(), "Date".to_string());
        ExpectOptions {
            nominal_types,
            host_profile: HostProfile::default(),
            overload_strategy: OverloadStrategyChoice::default(),
            brand_depth_limit: MAX_BRAND_DEPTH,
        }
    }
}

impl ExpectOptions {
    pub fn from_json_str(source: &str) -> Result<Self> {
        let options: ExpectOptions =
            serde_json::from_str(source).context("failed to parse typebrand options JSON")?;
        if options.brand_depth_limit == 0 {
            bail!("brandDepthLimit must be at least 1");
        }
        Ok(options)
    }

    pub fn solver_options(&self) -> SolverOptions {
        SolverOptions {
            host_profile: self.host_profile,
            overload_strategy: self.overload_strategy,
            brand_depth_limit: self.brand_depth_limit,
        }
    }
}

/// Read and parse an options file.
pub fn load_options(path: &Path) -> Result<ExpectOptions> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read typebrand options: {}", path.display()))?;
    ExpectOptions::from_json_str(&source)
        .with_context(|| format!("failed to parse typebrand options: {}", path.display()))
}

#[cfg(test)]
#[path = "../tests/options_tests.rs"]
mod tests;
