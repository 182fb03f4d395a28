//! # Number Schema
//!
//! Accepts JSON numbers directly and coerces non-blank text with a standard
//! decimal parse. Any conversion that does not yield a finite value is a
//! failure, never a number.
//!
//! ## Output Normalisation
//!
//! Coerced values with no fractional part are emitted as integer JSON
//! numbers, so `"8080"` validates to `8080` (deserializable into `u16`)
//! rather than `8080.0`. Numeric input is passed through untouched.

use envshape_core::Outcome;
use serde_json::{Number, Value};

use crate::contract::{Schema, SchemaKind, Validation};

/// Default issue text for [`NumberSchema`].
pub const DEFAULT_NUMBER_MESSAGE: &str = "Expected a number";

/// Accepts numbers and numeric text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberSchema {
    message: String,
}

impl NumberSchema {
    pub fn new() -> Self {
        Self::with_message(DEFAULT_NUMBER_MESSAGE)
    }

    /// A number schema that reports `message` on rejection.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Typed form of [`Schema::validate`].
    pub fn check(&self, input: &Value) -> Outcome<f64> {
        let parsed = match input {
            Value::Number(number) => number.as_f64(),
            Value::String(text) => parse_decimal(text),
            _ => None,
        };
        match parsed.filter(|n| n.is_finite()) {
            Some(n) => Outcome::success(n),
            None => Outcome::fail(self.message.as_str()),
        }
    }
}

impl Default for NumberSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl Schema for NumberSchema {
    fn kind(&self) -> SchemaKind {
        SchemaKind::Number
    }

    fn message(&self) -> &str {
        &self.message
    }

    fn validate<'a>(&'a self, input: &'a Value) -> Validation<'a> {
        if input.is_number() {
            return Validation::Ready(Outcome::success(input.clone()));
        }
        let outcome = match self.check(input) {
            Outcome::Success { value } => match number_value(value) {
                Some(number) => Outcome::success(number),
                None => Outcome::fail(self.message.as_str()),
            },
            Outcome::Failure { issues } => Outcome::failure(issues),
        };
        Validation::Ready(outcome)
    }
}

/// Standard decimal parse of non-blank text. Surrounding whitespace is ignored.
fn parse_decimal(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

/// Convert a finite float to a JSON number, preferring the integer form.
pub(crate) fn number_value(n: f64) -> Option<Value> {
    if !n.is_finite() {
        return None;
    }
    // i64::MAX as f64 rounds up to 2^63, hence the strict upper bound.
    if n.fract() == 0.0 && n >= i64::MIN as f64 && n < i64::MAX as f64 {
        return Some(Value::from(n as i64));
    }
    Number::from_f64(n).map(Value::Number)
}
