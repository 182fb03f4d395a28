//! # envshape-core — Foundational Types for envshape
//!
//! This crate defines the vocabulary every schema in the workspace speaks:
//! what a validation failure looks like, where in a nested record it
//! happened, and how a validation call reports its outcome.
//!
//! ## Key Design Principles
//!
//! 1. **One outcome type.** [`Outcome`] is either `Success { value }` or
//!    `Failure { issues }`. Exactly one variant is populated, which the enum
//!    enforces by construction.
//!
//! 2. **Issues carry paths, not strings.** An [`Issue`] keeps its location as
//!    an ordered list of [`PathSegment`]s. Rendering to a dotted path happens
//!    only at the error boundary ([`render_issues`]).
//!
//! 3. **One error boundary.** Schemas never return `Err`. [`ParseError`] is
//!    produced only by the parse driver when a failure outcome has to become
//!    a conventional Rust error.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `envshape-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod issue;
pub mod outcome;

// Re-export primary types for ergonomic imports.
pub use error::{DecodeError, ParseError};
pub use issue::{render_issues, Issue, PathSegment};
pub use outcome::Outcome;
