//! Assertion failures and their rendering.

use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;
use typebrand_solver::{MismatchInfo, Solver, format_type};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FailureKind {
    /// A positive assertion did not hold.
    Mismatch,
    /// A negated assertion held.
    Negated,
    /// An argument could not be turned into a type, or has the wrong shape
    /// for the assertion.
    InvalidType,
}

/// A [`MismatchInfo`] with every type rendered, ready for display and
/// golden files.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MismatchReport {
    Ok(String),
    Message(String),
    Properties(IndexMap<String, MismatchReport>),
    Array(Box<MismatchReport>),
}

impl MismatchReport {
    pub fn from_info(solver: &Solver, info: &MismatchInfo) -> Self {
        match info {
            MismatchInfo::Ok(type_id) => MismatchReport::Ok(format_type(solver, *type_id)),
            MismatchInfo::Message(message) => MismatchReport::Message(message.clone()),
            MismatchInfo::Properties(map) => MismatchReport::Properties(
                map.iter()
                    .map(|(key, value)| (key.clone(), MismatchReport::from_info(solver, value)))
                    .collect(),
            ),
            MismatchInfo::Array(inner) => {
                MismatchReport::Array(Box::new(MismatchReport::from_info(solver, inner)))
            }
        }
    }

    fn write_lines(&self, path: &str, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MismatchReport::Ok(_) => Ok(()),
            MismatchReport::Message(message) => {
                let path = if path.is_empty() { "(root)" } else { path };
                writeln!(f, "  at {path}: {message}")
            }
            MismatchReport::Properties(map) => {
                for (key, value) in map {
                    value.write_lines(&format!("{path}.{key}"), f)?;
                }
                Ok(())
            }
            MismatchReport::Array(inner) => inner.write_lines(&format!("{path}[number]"), f),
        }
    }
}

/// Why an assertion failed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpectationFailure {
    pub kind: FailureKind,
    /// The terminal that failed, e.g. `toEqualTypeOf`.
    pub assertion: &'static str,
    pub actual: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mismatch: Option<MismatchReport>,
}

impl ExpectationFailure {
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

impl fmt::Display for ExpectationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} failed: {}", self.assertion, self.message)?;
        writeln!(f, "  actual:   {}", self.actual)?;
        if let Some(expected) = &self.expected {
            writeln!(f, "  expected: {expected}")?;
        }
        if let Some(mismatch) = &self.mismatch {
            mismatch.write_lines("", f)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExpectationFailure {}

#[cfg(test)]
#[path = "../tests/failure_tests.rs"]
mod tests;
