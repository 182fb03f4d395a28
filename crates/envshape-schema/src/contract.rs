//! # Schema Contract
//!
//! Every schema in the workspace implements [`Schema`]: given an arbitrary
//! JSON value, produce an [`Outcome`] that is either the validated (and
//! possibly coerced) value or the issues explaining why it was rejected.
//!
//! ## Deferred Results
//!
//! A schema may need to suspend before it can answer (a custom validator
//! that consults something asynchronous). [`Validation`] models "an outcome
//! now, or an outcome later": built-in schemas always return
//! [`Validation::Ready`], and composites only go asynchronous when one of
//! their children actually defers.

use std::fmt;
use std::sync::Arc;

use envshape_core::Outcome;
use futures::future::BoxFuture;
use serde::Serialize;
use serde_json::Value;

/// Discriminant tag carried by every schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SchemaKind {
    String,
    Number,
    Boolean,
    Optional,
    Object,
    Record,
    Custom,
    LenientBoolean,
    LenientNumber,
}

impl SchemaKind {
    /// The tag as it appears in serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Optional => "optional",
            Self::Object => "object",
            Self::Record => "record",
            Self::Custom => "custom",
            Self::LenientBoolean => "lenient-boolean",
            Self::LenientNumber => "lenient-number",
        }
    }
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The answer to one `validate` call: available now, or after awaiting.
pub enum Validation<'a> {
    /// The outcome is already known.
    Ready(Outcome<Value>),
    /// The outcome settles when the future completes.
    Deferred(BoxFuture<'a, Outcome<Value>>),
}

impl<'a> Validation<'a> {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// The outcome if it is already known, without waiting.
    pub fn into_ready(self) -> Option<Outcome<Value>> {
        match self {
            Self::Ready(outcome) => Some(outcome),
            Self::Deferred(_) => None,
        }
    }

    /// Wait for the outcome.
    pub async fn settle(self) -> Outcome<Value> {
        match self {
            Self::Ready(outcome) => outcome,
            Self::Deferred(pending) => pending.await,
        }
    }

    /// Block the current thread until the outcome is known.
    ///
    /// Ready outcomes return immediately. Do not call this on a deferred
    /// validation from inside an async runtime worker; use [`settle`](Self::settle).
    pub fn resolve(self) -> Outcome<Value> {
        match self {
            Self::Ready(outcome) => outcome,
            Self::Deferred(pending) => futures::executor::block_on(pending),
        }
    }
}

impl fmt::Debug for Validation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready(outcome) => f.debug_tuple("Ready").field(outcome).finish(),
            Self::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

impl From<Outcome<Value>> for Validation<'_> {
    fn from(outcome: Outcome<Value>) -> Self {
        Self::Ready(outcome)
    }
}

/// A reusable, immutable validator and coercer for one logical type.
///
/// Implementations must be pure functions of their input apart from their
/// own fixed configuration, so one instance can validate many inputs,
/// concurrently if needed.
pub trait Schema: Send + Sync {
    /// Discriminant tag.
    fn kind(&self) -> SchemaKind;

    /// Default issue text used when this schema rejects its input.
    fn message(&self) -> &str;

    /// Validate `input`, coercing it into this schema's canonical form.
    fn validate<'a>(&'a self, input: &'a Value) -> Validation<'a>;
}

impl fmt::Debug for dyn Schema + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("kind", &self.kind())
            .field("message", &self.message())
            .finish()
    }
}

impl<S: Schema + ?Sized> Schema for &S {
    fn kind(&self) -> SchemaKind {
        (**self).kind()
    }

    fn message(&self) -> &str {
        (**self).message()
    }

    fn validate<'a>(&'a self, input: &'a Value) -> Validation<'a> {
        (**self).validate(input)
    }
}

impl<S: Schema + ?Sized> Schema for Box<S> {
    fn kind(&self) -> SchemaKind {
        (**self).kind()
    }

    fn message(&self) -> &str {
        (**self).message()
    }

    fn validate<'a>(&'a self, input: &'a Value) -> Validation<'a> {
        (**self).validate(input)
    }
}

impl<S: Schema + ?Sized> Schema for Arc<S> {
    fn kind(&self) -> SchemaKind {
        (**self).kind()
    }

    fn message(&self) -> &str {
        (**self).message()
    }

    fn validate<'a>(&'a self, input: &'a Value) -> Validation<'a> {
        (**self).validate(input)
    }
}
