//! # Boolean Schema
//!
//! Accepts native booleans, the numbers `1` and `0`, and a fixed,
//! case-sensitive set of spellings:
//!
//! | Result | Accepted text                       |
//! |--------|-------------------------------------|
//! | `true` | `"TRUE"`, `"True"`, `"true"`, `"1"`     |
//! | `false`| `"FALSE"`, `"False"`, `"false"`, `"0"`  |
//!
//! `"on"`/`"off"`/`"yes"`/`"no"` are not part of this table. The wider
//! spellings live only in [`crate::lenient`].

use envshape_core::Outcome;
use serde_json::Value;

use crate::contract::{Schema, SchemaKind, Validation};

/// Default issue text for [`BooleanSchema`].
pub const DEFAULT_BOOLEAN_MESSAGE: &str = "Expected a boolean";

/// Text accepted as `true`.
pub const TRUTHY: [&str; 4] = ["TRUE", "True", "true", "1"];

/// Text accepted as `false`.
pub const FALSY: [&str; 4] = ["FALSE", "False", "false", "0"];

/// Accepts booleans, `0`/`1`, and the spellings in [`TRUTHY`] / [`FALSY`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BooleanSchema {
    message: String,
}

impl BooleanSchema {
    pub fn new() -> Self {
        Self::with_message(DEFAULT_BOOLEAN_MESSAGE)
    }

    /// A boolean schema that reports `message` on rejection.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Typed form of [`Schema::validate`].
    pub fn check(&self, input: &Value) -> Outcome<bool> {
        match coerce(input) {
            Some(flag) => Outcome::success(flag),
            None => Outcome::fail(self.message.as_str()),
        }
    }
}

impl Default for BooleanSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl Schema for BooleanSchema {
    fn kind(&self) -> SchemaKind {
        SchemaKind::Boolean
    }

    fn message(&self) -> &str {
        &self.message
    }

    fn validate<'a>(&'a self, input: &'a Value) -> Validation<'a> {
        Validation::Ready(self.check(input).map(Value::Bool))
    }
}

fn coerce(input: &Value) -> Option<bool> {
    match input {
        Value::Bool(flag) => Some(*flag),
        Value::String(text) if TRUTHY.contains(&text.as_str()) => Some(true),
        Value::String(text) if FALSY.contains(&text.as_str()) => Some(false),
        Value::Number(number) => match number.as_f64() {
            Some(n) if n == 1.0 => Some(true),
            Some(n) if n == 0.0 => Some(false),
            _ => None,
        },
        _ => None,
    }
}
