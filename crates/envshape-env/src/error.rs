//! # Error Types
//!
//! [`EnvError`] covers everything that can go wrong between "read the
//! environment" and "hand back a validated configuration".
//!
//! ## Design
//!
//! - Validation failures wrap [`ParseError`] transparently, so the rendered
//!   summary (`"PORT, DATABASE_URL"`) prints unchanged and the issue list
//!   stays reachable through [`EnvError::issues`].
//! - Source failures name the source that failed and why.

use envshape_core::{DecodeError, Issue, ParseError};
use thiserror::Error;

/// Failure while loading or validating environment configuration.
#[derive(Error, Debug)]
pub enum EnvError {
    /// The environment did not satisfy the shape.
    #[error(transparent)]
    Validation(#[from] ParseError),

    /// An environment source could not produce a snapshot.
    ///
    /// The built-in sources never fail this way; it is the variant for
    /// [`EnvSource`](crate::EnvSource) implementations backed by something
    /// that can be unavailable (a secrets service, a remote store).
    #[error("environment source '{source_name}' failed: {reason}")]
    Source {
        /// Name of the source that failed.
        source_name: String,
        /// Reason the snapshot could not be taken.
        reason: String,
    },

    /// A `.env` file could not be read or parsed.
    #[error("dotenv file '{path}' could not be loaded: {reason}")]
    Dotenv {
        /// Path to the file.
        path: String,
        /// Reason the file was rejected.
        reason: String,
    },

    /// The validated configuration does not fit the requested Rust type.
    #[error("validated value does not match the target type: {0}")]
    Deserialize(String),
}

impl From<DecodeError> for EnvError {
    fn from(err: DecodeError) -> Self {
        match err {
            DecodeError::Validation(err) => Self::Validation(err),
            DecodeError::Deserialize(reason) => Self::Deserialize(reason),
        }
    }
}

impl EnvError {
    /// The validation issues, or an empty slice for non-validation errors.
    pub fn issues(&self) -> &[Issue] {
        match self {
            Self::Validation(err) => err.issues(),
            _ => &[],
        }
    }

    /// Configuration keys that failed validation, in report order.
    ///
    /// Issues without a path (such as a non-record input) contribute nothing.
    pub fn failed_keys(&self) -> Vec<String> {
        self.issues().iter().filter_map(Issue::dotted_path).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_displays_rendered_summary() {
        let err: EnvError = ParseError::from_issues(vec![
            Issue::new("Expected a number").within("PORT"),
            Issue::new("Expected a string").within("HOST"),
        ])
        .into();
        assert_eq!(err.to_string(), "PORT, HOST");
        assert_eq!(err.failed_keys(), vec!["PORT", "HOST"]);
        assert_eq!(err.issues().len(), 2);
    }

    #[test]
    fn source_error_has_no_issues() {
        let err = EnvError::Source {
            source_name: "vault".into(),
            reason: "sealed".into(),
        };
        assert_eq!(err.to_string(), "environment source 'vault' failed: sealed");
        assert!(err.issues().is_empty());
        assert!(err.failed_keys().is_empty());
    }

    #[test]
    fn decode_errors_keep_their_kind() {
        let mismatch: EnvError = DecodeError::Deserialize("bad port".into()).into();
        assert!(matches!(mismatch, EnvError::Deserialize(_)));
        assert_eq!(
            mismatch.to_string(),
            DecodeError::Deserialize("bad port".into()).to_string()
        );

        let invalid: EnvError =
            DecodeError::from(ParseError::from_issues(vec![Issue::new("x").within("PORT")])).into();
        assert_eq!(invalid.failed_keys(), vec!["PORT"]);
    }

    #[test]
    fn dotenv_error_names_path() {
        let err = EnvError::Dotenv {
            path: "/tmp/.env".into(),
            reason: "missing".into(),
        };
        assert!(err.to_string().contains("/tmp/.env"));
    }
}
