//! # envshape-schema — Validating Schemas
//!
//! Small, composable schemas that validate and coerce arbitrary JSON values.
//!
//! ## Building Blocks
//!
//! - [`string`], [`number`], [`boolean`] — primitive schemas with
//!   type-specific coercion (numeric text to numbers, a fixed set of
//!   spellings to booleans).
//! - [`optional`] — accepts absence, otherwise defers to the wrapped schema.
//! - [`object`] / [`record`] — validates a JSON object field-by-field against
//!   a [`Shape`], prefixing each failure with the field's key.
//! - [`custom`] / [`custom_async`] — closures as schemas.
//! - [`lenient`] — adapter-style tables that accept `"on"`/`"off"` and
//!   script-style number conversion.
//!
//! ## Parsing
//!
//! [`parse`] runs a schema and converts a failed outcome into a
//! [`ParseError`](envshape_core::ParseError):
//!
//! ```
//! use envshape_schema::{number, object, parse, string, Shape};
//! use serde_json::json;
//!
//! let schema = object(Shape::new().field("name", string()).field("age", number()));
//! let value = parse(&schema, &json!({"name": "A", "age": "26"})).unwrap();
//! assert_eq!(value, json!({"name": "A", "age": 26}));
//!
//! let err = parse(&schema, &json!({"name": "A", "age": "x"})).unwrap_err();
//! assert_eq!(err.to_string(), "age");
//! ```
//!
//! ## Crate Policy
//!
//! - Depends only on `envshape-core` internally.
//! - Schemas never panic and never return `Err`; only the parse driver
//!   produces errors.

pub mod boolean;
pub mod contract;
pub mod custom;
pub mod lenient;
pub mod number;
pub mod object;
pub mod optional;
pub mod parse;
pub mod string;

use std::future::Future;

use envshape_core::Outcome;
use serde_json::Value;

pub use boolean::BooleanSchema;
pub use contract::{Schema, SchemaKind, Validation};
pub use custom::{AsyncFnSchema, FnSchema};
pub use number::NumberSchema;
pub use object::{Field, ObjectSchema, Shape};
pub use optional::OptionalSchema;
pub use parse::{decode, parse, parse_as, parse_async, render_issues};
pub use string::StringSchema;

/// A string schema with the default message.
pub fn string() -> StringSchema {
    StringSchema::new()
}

/// A number schema with the default message.
pub fn number() -> NumberSchema {
    NumberSchema::new()
}

/// A boolean schema with the default message.
pub fn boolean() -> BooleanSchema {
    BooleanSchema::new()
}

/// Wrap `inner` so that `null` or a missing field is accepted.
pub fn optional<S: Schema + 'static>(inner: S) -> OptionalSchema {
    OptionalSchema::new(inner)
}

/// An object composer over `shape`, rejecting non-objects with
/// `"Expected an object"`.
pub fn object(shape: Shape) -> ObjectSchema {
    ObjectSchema::object(shape)
}

/// A record composer over `shape`, rejecting non-objects with
/// `"Invalid record"`.
pub fn record(shape: Shape) -> ObjectSchema {
    ObjectSchema::record(shape)
}

/// A synchronous schema from a closure.
pub fn custom<F>(message: impl Into<String>, check: F) -> FnSchema<F>
where
    F: Fn(&Value) -> Outcome<Value> + Send + Sync,
{
    FnSchema::new(message, check)
}

/// A deferred schema from a closure returning a future.
pub fn custom_async<F, Fut>(message: impl Into<String>, check: F) -> AsyncFnSchema<F>
where
    F: Fn(Value) -> Fut + Send + Sync,
    Fut: Future<Output = Outcome<Value>> + Send + 'static,
{
    AsyncFnSchema::new(message, check)
}
