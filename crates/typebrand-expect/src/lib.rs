//! Fluent type assertions.
//!
//! ```
//! use typebrand_expect::{TypeSession, expect_type_of_source};
//!
//! let mut session = TypeSession::new();
//! session.declare("type User = { id: number; name?: string };").unwrap();
//! let user = expect_type_of_source(&session, "User").unwrap();
//! assert!(user.to_have_property("id").unwrap().to_be_number().is_ok());
//! assert!(user.to_equal_type_of("{ id: number; name: string | undefined }").is_err());
//! ```
pub mod chain;
pub use chain::{
    ExpectTypeOf, Negative, Polarity, Positive, TypeArg, expect_type_of, expect_type_of_source,
    expect_type_of_value,
};

pub mod failure;
pub use failure::{ExpectationFailure, FailureKind, MismatchReport};

pub mod infer;
pub use infer::Widening;

pub mod options;
pub use options::{ExpectOptions, load_options};

pub mod session;
pub use session::TypeSession;

pub use typebrand_solver::TypeId;
