//! # Optional Wrapper
//!
//! Decorates another schema so that absence is accepted. `null` input (and,
//! through the object composer, a missing key) succeeds with `null` before
//! the inner schema is consulted, so even a schema that rejects everything
//! accepts absence once wrapped.
//!
//! Present values are delegated to the inner schema unchanged, including any
//! path segments it reports. The wrapper adds no segment of its own.

use envshape_core::Outcome;
use serde_json::Value;

use crate::contract::{Schema, SchemaKind, Validation};

/// Default descriptive message for [`OptionalSchema`]. The wrapper itself
/// never reports it; failures come from the inner schema.
pub const DEFAULT_OPTIONAL_MESSAGE: &str = "Value is optional";

/// Accepts absence, otherwise delegates to the wrapped schema.
#[derive(Debug)]
pub struct OptionalSchema {
    inner: Option<Box<dyn Schema>>,
    message: String,
}

impl OptionalSchema {
    /// Wrap `inner`.
    pub fn new<S: Schema + 'static>(inner: S) -> Self {
        Self {
            inner: Some(Box::new(inner)),
            message: DEFAULT_OPTIONAL_MESSAGE.to_string(),
        }
    }

    /// An optional with no inner schema. Every input validates to `null`.
    pub fn empty() -> Self {
        Self {
            inner: None,
            message: DEFAULT_OPTIONAL_MESSAGE.to_string(),
        }
    }

    /// Replace the descriptive message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// The wrapped schema, if any.
    pub fn inner(&self) -> Option<&dyn Schema> {
        self.inner.as_deref()
    }
}

impl Schema for OptionalSchema {
    fn kind(&self) -> SchemaKind {
        SchemaKind::Optional
    }

    fn message(&self) -> &str {
        &self.message
    }

    fn validate<'a>(&'a self, input: &'a Value) -> Validation<'a> {
        match &self.inner {
            Some(inner) if !input.is_null() => inner.validate(input),
            _ => Validation::Ready(Outcome::success(Value::Null)),
        }
    }
}
