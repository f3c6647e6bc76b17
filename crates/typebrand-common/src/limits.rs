//! Centralized limits and thresholds.
//!
//! Shared constants for recursion depths, pattern widths and capacity limits
//! used throughout the workspace. Solver recursion guards take their limits
//! from `typebrand_solver::recursion::RecursionProfile`, which reads the
//! values defined here.

// =============================================================================
// Overload extraction
// =============================================================================

/// Number of call-signature slots in the overload matching pattern.
///
/// Overloads are enumerated by matching a callable against a pattern made of
/// this many call signatures. A callable with more overloads than this keeps
/// only its last `MAX_OVERLOAD_SLOTS` signatures, the same way the pattern
/// match in a TypeScript checker only sees the trailing signatures.
///
/// # TypeScript example
///
/// ```typescript
/// declare function f(a: 1): 1;
/// declare function f(a: 2): 2;
/// // ... up to ten overloads are enumerated ...
/// declare function f(a: 11): 11; // the first overload falls off the front
/// ```
pub const MAX_OVERLOAD_SLOTS: usize = 10;

// =============================================================================
// Recursion depth limits
// =============================================================================

/// Maximum nesting depth for deep branding.
///
/// Types are finite DAGs once interned, so this only trips on pathologically
/// deep hand-built types. When exceeded the nested position brands as
/// `unknown` and a warning is logged.
pub const MAX_BRAND_DEPTH: u32 = 200;

/// Maximum nesting depth for the native assignability relation.
pub const MAX_SUBTYPE_DEPTH: u32 = 100;

/// Maximum total relation steps for a single top-level assignability query.
pub const MAX_SUBTYPE_ITERATIONS: u32 = 100_000;

/// Maximum nesting depth for mismatch-message synthesis.
///
/// Deeper positions collapse into a single "Expected: ..., Actual: ..." leaf.
pub const MAX_MISMATCH_DEPTH: u32 = 50;

/// Maximum nesting depth accepted by the type-expression parser.
///
/// # TypeScript example
///
/// ```typescript
/// type Deep = ((((((((((((string))))))))))));
/// ```
pub const MAX_PARSE_DEPTH: u32 = 256;

/// Maximum depth for the brand-sensitivity scan. Deeper types are treated
/// as sensitive everywhere.
pub const MAX_SHALLOW_DEPTH: u32 = 64;

// =============================================================================
// Capacity limits
// =============================================================================

/// Object shapes with at least this many properties get a name → index map
/// cached alongside them.
pub const PROPERTY_MAP_THRESHOLD: usize = 24;

/// Inline capacity for small type lists (union members, tuple elements).
pub const TYPE_LIST_INLINE: usize = 8;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limits_are_ordered() {
        assert!(MAX_SHALLOW_DEPTH < MAX_BRAND_DEPTH);
        assert!(MAX_MISMATCH_DEPTH <= MAX_SUBTYPE_DEPTH);
        assert_eq!(MAX_OVERLOAD_SLOTS, 10);
    }
}
