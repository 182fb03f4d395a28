//! # Parse Error
//!
//! The single error type produced when a failed [`Outcome`](crate::Outcome)
//! crosses into conventional `Result`-based error handling.
//!
//! ## Design
//!
//! - `Display` is the comma-joined summary from [`render_issues`], suitable
//!   for printing directly at application startup.
//! - The full issue list stays available for programmatic handling, e.g.
//!   mapping each issue back to the configuration key that caused it.
//! - [`DecodeError`] covers the typed parse forms. A validated value that
//!   does not fit the requested Rust type is its own variant and never shows
//!   up as an [`Issue`].

use thiserror::Error;

use crate::issue::{render_issues, Issue};

/// A schema rejected its input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ParseError {
    message: String,
    issues: Vec<Issue>,
}

impl ParseError {
    /// Build the error from the issues of a failed outcome.
    pub fn from_issues(issues: Vec<Issue>) -> Self {
        Self {
            message: render_issues(&issues),
            issues,
        }
    }

    /// The rendered summary, identical to `Display`.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The original issues, in the order the schema reported them.
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// Consume the error and return its issues.
    pub fn into_issues(self) -> Vec<Issue> {
        self.issues
    }
}

/// Failure of a typed parse: validation, then deserialization into `T`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The schema rejected the input.
    #[error(transparent)]
    Validation(#[from] ParseError),

    /// The validated value does not fit the target type.
    #[error("validated value does not match the target type: {0}")]
    Deserialize(String),
}

impl DecodeError {
    /// The validation issues, or an empty slice for a type mismatch.
    pub fn issues(&self) -> &[Issue] {
        match self {
            Self::Validation(err) => err.issues(),
            Self::Deserialize(_) => &[],
        }
    }
}
