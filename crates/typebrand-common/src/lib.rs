//! Common types and utilities for the typebrand workspace.
//!
//! This crate provides foundational types used across all typebrand crates:
//! - String interning (`Atom`, `ShardedInterner`)
//! - Source spans (`Span`)
//! - Engine limits and thresholds

// String interning for property names and literal values
pub mod interner;
pub use interner::{Atom, ShardedInterner};

// Span - Source location tracking (byte offsets)
pub mod span;
pub use span::Span;

// Centralized limits and thresholds
pub mod limits;

// Stack growth for deep recursion
pub mod stack;
pub use stack::ensure_sufficient_stack;
