//! Structural Type Solver
//!
//! An interned model of TypeScript types and the layers the assertion
//! surface is built from:
//!
//! - **Interning**: `TypeId` equality is structural equality
//! - **Relation**: native assignability with coinductive cycle handling
//! - **Branding**: deep structural descriptors that expose what the native
//!   relation ignores (`any`, optionality, readonly, overloads)
//! - **Mismatch**: a per-property report of why two types differ
//!
//! Every layer is a set of free functions over a shared [`Solver`].
pub mod brand;
pub mod builtins;
pub mod equality;
pub mod format;
pub mod intern;
pub mod keys;
pub mod logic;
pub mod lower;
pub mod mismatch;
pub mod operations;
pub mod overloads;
pub mod print;
pub mod recursion;
pub mod relation;
pub mod solver;
pub mod special;
pub mod structure;
pub mod types;
pub mod utils;

pub use brand::{
    Brand, Brander, ObjectBrand, TupleItemBrand, brand_extends, brand_matches, deep_brand,
};
pub use equality::{
    Sensitivity, extends, extends_using_branding, strict_equal, strict_equal_using_branding,
    strict_equal_using_internal_identity,
};
pub use format::{TypeFormatter, format_type};
pub use intern::TypeInterner;
pub use keys::KeySet;
pub use lower::{LowerError, TypeEnv, declare_source, lower_type_node, lower_type_source};
pub use mismatch::{MismatchInfo, mismatch_info};
pub use overloads::{OverloadInfo, OverloadStrategy};
pub use print::print_type;
pub use solver::{
    HostProfile, NominalRegistry, OverloadStrategyChoice, QueryCache, Solver, SolverOptions,
};
pub use special::SpecialKind;
pub use types::{IntrinsicKind, LiteralValue, TypeId, TypeKey};
