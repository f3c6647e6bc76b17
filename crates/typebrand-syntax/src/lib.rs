//! Scanner and parser for the TypeScript type syntax understood by typebrand.
//!
//! The accepted language is the type-expression subset of TypeScript
//! (keywords, literals, references with type arguments, arrays, tuples,
//! `readonly`, unions, intersections, function and constructor types, object
//! type literals, type predicates) plus the declarations needed to name types:
//! `type`, `interface`, `declare function` and `declare const`.

pub mod ast;
pub use ast::{
    Declaration, KeywordType, MemberNode, ParamNode, PredicateNode, PredicateTarget,
    ReturnTypeNode, SignatureNode, SourceFile, TupleElementNode, TypeNode, TypeNodeKind,
};

pub mod scanner;
pub use scanner::{Scanner, SyntaxKind};

pub mod parser;
pub use parser::{ParseDiagnostic, ParseError, Parser, parse_source, parse_type};
