//! # Parse Driver
//!
//! The single place where a failed [`Outcome`] becomes a Rust error. Schemas
//! report failure as data; [`parse`] and its variants turn that data into a
//! [`ParseError`] whose `Display` is the comma-joined summary produced by
//! [`render_issues`] and which keeps every original issue for inspection.
//!
//! ## Sync vs Async
//!
//! [`parse`] is synchronous. It only blocks when a schema actually defers,
//! which none of the built-in schemas do. Code already running inside an
//! async runtime should use [`parse_async`] so a deferred validation is
//! awaited rather than blocked on.

use envshape_core::{DecodeError, Outcome, ParseError};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::contract::{Schema, SchemaKind};

pub use envshape_core::render_issues;

/// Validate `input` against `schema`, returning the validated value.
///
/// # Errors
///
/// Returns [`ParseError`] carrying every issue when validation fails.
pub fn parse<S: Schema + ?Sized>(schema: &S, input: &Value) -> Result<Value, ParseError> {
    let outcome = schema.validate(input).resolve();
    conclude(schema.kind(), outcome)
}

/// Async form of [`parse`]: awaits a deferred validation.
///
/// # Errors
///
/// Returns [`ParseError`] carrying every issue when validation fails.
pub async fn parse_async<S: Schema + ?Sized>(
    schema: &S,
    input: &Value,
) -> Result<Value, ParseError> {
    let outcome = schema.validate(input).settle().await;
    conclude(schema.kind(), outcome)
}

/// [`parse`], then deserialize the validated value into `T`.
///
/// # Errors
///
/// [`DecodeError::Validation`] when validation fails,
/// [`DecodeError::Deserialize`] when the validated value does not fit `T`.
pub fn parse_as<T: DeserializeOwned, S: Schema + ?Sized>(
    schema: &S,
    input: &Value,
) -> Result<T, DecodeError> {
    let value = parse(schema, input)?;
    decode(value)
}

/// Deserialize a value that already passed validation.
pub fn decode<T: DeserializeOwned>(value: Value) -> Result<T, DecodeError> {
    serde_json::from_value(value).map_err(|e| DecodeError::Deserialize(e.to_string()))
}

fn conclude(kind: SchemaKind, outcome: Outcome<Value>) -> Result<Value, ParseError> {
    match outcome {
        Outcome::Success { value } => Ok(value),
        Outcome::Failure { issues } => {
            tracing::debug!(schema = %kind, issues = issues.len(), "schema rejected input");
            Err(ParseError::from_issues(issues))
        }
    }
}
