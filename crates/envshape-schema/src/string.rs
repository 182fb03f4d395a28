//! String schema: accepts textual input unchanged.

use envshape_core::Outcome;
use serde_json::Value;

use crate::contract::{Schema, SchemaKind, Validation};

/// Default issue text for [`StringSchema`].
pub const DEFAULT_STRING_MESSAGE: &str = "Expected a string";

/// Accepts strings as-is. No trimming, case folding, or length checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringSchema {
    message: String,
}

impl StringSchema {
    pub fn new() -> Self {
        Self::with_message(DEFAULT_STRING_MESSAGE)
    }

    /// A string schema that reports `message` on rejection.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Typed form of [`Schema::validate`].
    pub fn check(&self, input: &Value) -> Outcome<String> {
        match input {
            Value::String(text) => Outcome::success(text.clone()),
            _ => Outcome::fail(self.message.as_str()),
        }
    }
}

impl Default for StringSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl Schema for StringSchema {
    fn kind(&self) -> SchemaKind {
        SchemaKind::String
    }

    fn message(&self) -> &str {
        &self.message
    }

    fn validate<'a>(&'a self, input: &'a Value) -> Validation<'a> {
        Validation::Ready(self.check(input).map(Value::String))
    }
}
