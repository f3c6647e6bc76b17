//! typebrand: type-level assertions over a structural TypeScript type
//! model.
//!
//! ```
//! use typebrand::{TypeSession, expect_type_of_source};
//!
//! let session = TypeSession::new();
//! let f = expect_type_of_source(&session, "(a: number) => Promise<string>").unwrap();
//! assert!(f.parameter(0).to_be_number().is_ok());
//! assert!(f.returns().resolves().to_equal_type_of("string").is_ok());
//! assert!(f.returns().not().to_be_any().is_ok());
//! ```
//!
//! The layers are separate crates, re-exported here:
//!
//! - [`common`]: interning, spans, limits
//! - [`syntax`]: the type-expression scanner and parser
//! - [`solver`]: the type model, assignability, branding, mismatch reports
//! - [`expect`]: sessions, options and the assertion chain

pub mod tracing_config;

pub use typebrand_common as common;
pub use typebrand_expect as expect;
pub use typebrand_solver as solver;
pub use typebrand_syntax as syntax;

pub use typebrand_expect::{
    ExpectOptions, ExpectTypeOf, ExpectationFailure, FailureKind, MismatchReport, Negative,
    Positive, TypeArg, TypeSession, expect_type_of, expect_type_of_source, expect_type_of_value,
    load_options,
};
pub use typebrand_solver::TypeId;
