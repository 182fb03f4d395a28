//! # Lenient Coercion Tables
//!
//! Pre-processing schemas in the style of validation-library adapters: the
//! input is normalised first, then held to a strict type check. They accept
//! spellings the core schemas deliberately do not, and are kept separate so
//! each table can be tested on its own.
//!
//! | Schema | Accepts |
//! |--------|---------|
//! | [`boolean`] | `true`/`false`, `"true"`/`"on"`/`"1"`, `"false"`/`"off"`/`"0"` |
//! | [`number`] | numbers, text converted with script-style `Number()` rules |
//!
//! Differences from the core tables:
//!
//! - [`boolean`] accepts `"on"`/`"off"` but only lowercase spellings, and
//!   rejects numeric input.
//! - [`number`] treats blank text as `0` and understands `0x`/`0o`/`0b`
//!   integer prefixes.

use envshape_core::Outcome;
use serde_json::Value;

use crate::boolean::DEFAULT_BOOLEAN_MESSAGE;
use crate::contract::{Schema, SchemaKind, Validation};
use crate::number::{number_value, DEFAULT_NUMBER_MESSAGE};

/// Text normalised to `true`.
pub const LENIENT_TRUTHY: [&str; 3] = ["true", "on", "1"];

/// Text normalised to `false`.
pub const LENIENT_FALSY: [&str; 3] = ["false", "off", "0"];

/// A boolean schema using the [`LENIENT_TRUTHY`] / [`LENIENT_FALSY`] table.
pub fn boolean() -> LenientBoolean {
    LenientBoolean::new()
}

/// A number schema using script-style text conversion.
pub fn number() -> LenientNumber {
    LenientNumber::new()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LenientBoolean {
    message: String,
}

impl LenientBoolean {
    pub fn new() -> Self {
        Self::with_message(DEFAULT_BOOLEAN_MESSAGE)
    }

    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Typed form of [`Schema::validate`].
    pub fn check(&self, input: &Value) -> Outcome<bool> {
        match normalize_boolean(input) {
            Value::Bool(flag) => Outcome::success(flag),
            _ => Outcome::fail(self.message.as_str()),
        }
    }
}

impl Default for LenientBoolean {
    fn default() -> Self {
        Self::new()
    }
}

impl Schema for LenientBoolean {
    fn kind(&self) -> SchemaKind {
        SchemaKind::LenientBoolean
    }

    fn message(&self) -> &str {
        &self.message
    }

    fn validate<'a>(&'a self, input: &'a Value) -> Validation<'a> {
        Validation::Ready(self.check(input).map(Value::Bool))
    }
}

/// Map recognised spellings to booleans; leave everything else as-is for the
/// strict check to reject.
fn normalize_boolean(input: &Value) -> Value {
    match input {
        Value::String(text) if LENIENT_TRUTHY.contains(&text.as_str()) => Value::Bool(true),
        Value::String(text) if LENIENT_FALSY.contains(&text.as_str()) => Value::Bool(false),
        other => other.clone(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LenientNumber {
    message: String,
}

impl LenientNumber {
    pub fn new() -> Self {
        Self::with_message(DEFAULT_NUMBER_MESSAGE)
    }

    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Typed form of [`Schema::validate`].
    pub fn check(&self, input: &Value) -> Outcome<f64> {
        let converted = match input {
            Value::Number(number) => number.as_f64(),
            Value::String(text) => Some(script_number(text)),
            _ => None,
        };
        match converted.filter(|n| n.is_finite()) {
            Some(n) => Outcome::success(n),
            None => Outcome::fail(self.message.as_str()),
        }
    }
}

impl Default for LenientNumber {
    fn default() -> Self {
        Self::new()
    }
}

impl Schema for LenientNumber {
    fn kind(&self) -> SchemaKind {
        SchemaKind::LenientNumber
    }

    fn message(&self) -> &str {
        &self.message
    }

    fn validate<'a>(&'a self, input: &'a Value) -> Validation<'a> {
        if input.is_number() {
            return Validation::Ready(Outcome::success(input.clone()));
        }
        let outcome = match self.check(input).map(number_value) {
            Outcome::Success { value: Some(number) } => Outcome::success(number),
            _ => Outcome::fail(self.message.as_str()),
        };
        Validation::Ready(outcome)
    }
}

/// Script-style `Number(text)`: NaN for anything unparseable.
fn script_number(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    let radix = match trimmed.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return trimmed.get(2..).map_or(f64::NAN, |digits| radix_number(digits, radix));
    }
    match trimmed {
        "Infinity" | "+Infinity" => f64::INFINITY,
        "-Infinity" => f64::NEG_INFINITY,
        // Rust also accepts "inf"/"nan" spellings, which `Number()` does not.
        _ if trimmed.chars().any(|c| c.is_ascii_alphabetic() && !matches!(c, 'e' | 'E')) => {
            f64::NAN
        }
        _ => trimmed.parse().unwrap_or(f64::NAN),
    }
}

/// Digits after a `0x`/`0o`/`0b` prefix. No sign, no separators, and no
/// upper bound: the value is accumulated as `f64`.
fn radix_number(digits: &str, radix: u32) -> f64 {
    if digits.is_empty() {
        return f64::NAN;
    }
    digits.chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
    })
    .unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn boolean_table_accepts_on_off() {
        let schema = boolean();
        assert_eq!(schema.kind(), SchemaKind::LenientBoolean);
        for text in LENIENT_TRUTHY {
            assert_eq!(schema.check(&json!(text)), Outcome::success(true), "{text:?}");
        }
        for text in LENIENT_FALSY {
            assert_eq!(schema.check(&json!(text)), Outcome::success(false), "{text:?}");
        }
        assert_eq!(schema.check(&json!(true)), Outcome::success(true));
        assert_eq!(schema.check(&json!(false)), Outcome::success(false));
    }

    #[test]
    fn boolean_table_is_lowercase_only() {
        let schema = boolean();
        for text in ["TRUE", "True", "ON", "Off", "invalid", "yes"] {
            assert_eq!(schema.check(&json!(text)), Outcome::fail("Expected a boolean"), "{text:?}");
        }
    }

    #[test]
    fn boolean_table_rejects_numbers() {
        let schema = boolean();
        assert_eq!(schema.check(&json!(1)), Outcome::fail("Expected a boolean"));
        assert_eq!(schema.check(&json!(0)), Outcome::fail("Expected a boolean"));
    }

    #[test]
    fn core_boolean_table_is_not_widened() {
        let core = crate::boolean();
        assert!(core.check(&json!("on")).is_failure());
        assert!(core.check(&json!("TRUE")).is_success());
        assert!(boolean().check(&json!("TRUE")).is_failure());
    }

    #[test]
    fn number_converts_text() {
        let schema = number();
        assert_eq!(schema.kind(), SchemaKind::LenientNumber);
        assert_eq!(schema.validate(&json!("8080")).resolve(), Outcome::success(json!(8080)));
        assert_eq!(schema.validate(&json!(8080)).resolve(), Outcome::success(json!(8080)));
        assert_eq!(schema.validate(&json!(" 2.5 ")).resolve(), Outcome::success(json!(2.5)));
        assert_eq!(schema.validate(&json!("0x1F")).resolve(), Outcome::success(json!(31)));
        assert_eq!(schema.validate(&json!("0b101")).resolve(), Outcome::success(json!(5)));
    }

    #[test]
    fn number_treats_blank_text_as_zero() {
        assert_eq!(number().validate(&json!("")).resolve(), Outcome::success(json!(0)));
        assert!(crate::number().validate(&json!("")).resolve().is_failure());
    }

    #[test]
    fn number_rejects_unparseable_and_non_finite() {
        let schema = number();
        for text in ["abc", "Infinity", "-Infinity", "inf", "nan", "0xZZ", "1e400"] {
            assert_eq!(schema.check(&json!(text)), Outcome::fail("Expected a number"), "{text:?}");
        }
        assert_eq!(schema.check(&json!(true)), Outcome::fail("Expected a number"));
        assert_eq!(schema.check(&json!(null)), Outcome::fail("Expected a number"));
    }

    #[test]
    fn prefixed_digits_reject_signs() {
        let schema = number();
        for text in ["0x+1", "0x-1", "0b+1", "0o", "0x", "0b102", "0o9"] {
            assert_eq!(schema.check(&json!(text)), Outcome::fail("Expected a number"), "{text:?}");
        }
    }

    #[test]
    fn prefixed_digits_beyond_u64_stay_finite() {
        let outcome = number().check(&json!("0x1FFFFFFFFFFFFFFFFF"));
        assert_eq!(outcome, Outcome::success(2f64.powi(69)));
        assert_eq!(number().check(&json!("0o17")), Outcome::success(15.0));
    }

    #[test]
    fn number_accepts_exponent_notation() {
        assert_eq!(number().check(&json!("1e3")), Outcome::success(1000.0));
        assert_eq!(number().check(&json!("-2E2")), Outcome::success(-200.0));
    }

    #[test]
    fn custom_messages() {
        assert_eq!(
            LenientBoolean::with_message("flag").check(&json!("x")),
            Outcome::fail("flag")
        );
        assert_eq!(
            LenientNumber::with_message("num").check(&json!("x")),
            Outcome::fail("num")
        );
    }
}
