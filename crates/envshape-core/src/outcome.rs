//! # Validation Outcome
//!
//! [`Outcome`] is the result of one `validate` call. It is deliberately not
//! `std::result::Result`: a failing validation is an expected answer, not an
//! error, and the failure side always carries a list of issues rather than a
//! single error value.
//!
//! ## Wire Shape
//!
//! Serializes untagged, so success is `{"value": ...}` and failure is
//! `{"issues": [...]}`. No serialized outcome ever has both keys.

use serde::{Deserialize, Serialize};

use crate::issue::Issue;

/// Success with a value, or failure with the issues that caused it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Outcome<T> {
    /// Validation succeeded.
    Success {
        /// The validated (and possibly coerced) value.
        value: T,
    },
    /// Validation failed.
    Failure {
        /// Ordered failures. Non-empty for every outcome produced by this
        /// workspace's schemas.
        issues: Vec<Issue>,
    },
}

impl<T> Outcome<T> {
    /// A successful outcome.
    pub fn success(value: T) -> Self {
        Self::Success { value }
    }

    /// A failed outcome carrying `issues`.
    pub fn failure(issues: Vec<Issue>) -> Self {
        Self::Failure { issues }
    }

    /// A failed outcome with a single path-less issue.
    pub fn fail(message: impl Into<String>) -> Self {
        Self::Failure {
            issues: vec![Issue::new(message)],
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure { .. })
    }

    /// The success value, if any.
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Success { value } => Some(value),
            Self::Failure { .. } => None,
        }
    }

    /// The failure issues, or an empty slice on success.
    pub fn issues(&self) -> &[Issue] {
        match self {
            Self::Success { .. } => &[],
            Self::Failure { issues } => issues,
        }
    }

    /// Transform the success value, leaving failures untouched.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Self::Success { value } => Outcome::Success { value: f(value) },
            Self::Failure { issues } => Outcome::Failure { issues },
        }
    }

    /// Convert into a `Result`, with the issue list as the error.
    pub fn into_result(self) -> Result<T, Vec<Issue>> {
        match self {
            Self::Success { value } => Ok(value),
            Self::Failure { issues } => Err(issues),
        }
    }
}

impl<T> From<Result<T, Vec<Issue>>> for Outcome<T> {
    fn from(result: Result<T, Vec<Issue>>) -> Self {
        match result {
            Ok(value) => Self::Success { value },
            Err(issues) => Self::Failure { issues },
        }
    }
}
