//! Schemas built from closures, synchronous or asynchronous.
//!
//! These are the escape hatch for validation the built-in schemas do not
//! cover, and the only built-in way to produce a deferred validation.

use std::fmt;
use std::future::Future;

use envshape_core::Outcome;
use serde_json::Value;

use crate::contract::{Schema, SchemaKind, Validation};

/// A schema whose validation is a synchronous closure.
pub struct FnSchema<F> {
    message: String,
    check: F,
}

impl<F> FnSchema<F>
where
    F: Fn(&Value) -> Outcome<Value> + Send + Sync,
{
    pub fn new(message: impl Into<String>, check: F) -> Self {
        Self {
            message: message.into(),
            check,
        }
    }
}

impl<F> fmt::Debug for FnSchema<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnSchema")
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

impl<F> Schema for FnSchema<F>
where
    F: Fn(&Value) -> Outcome<Value> + Send + Sync,
{
    fn kind(&self) -> SchemaKind {
        SchemaKind::Custom
    }

    fn message(&self) -> &str {
        &self.message
    }

    fn validate<'a>(&'a self, input: &'a Value) -> Validation<'a> {
        Validation::Ready((self.check)(input))
    }
}

/// A schema whose validation always defers to a future.
///
/// The closure receives an owned copy of the input so the returned future
/// does not borrow from the caller.
pub struct AsyncFnSchema<F> {
    message: String,
    check: F,
}

impl<F, Fut> AsyncFnSchema<F>
where
    F: Fn(Value) -> Fut + Send + Sync,
    Fut: Future<Output = Outcome<Value>> + Send + 'static,
{
    pub fn new(message: impl Into<String>, check: F) -> Self {
        Self {
            message: message.into(),
            check,
        }
    }
}

impl<F> fmt::Debug for AsyncFnSchema<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncFnSchema")
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

impl<F, Fut> Schema for AsyncFnSchema<F>
where
    F: Fn(Value) -> Fut + Send + Sync,
    Fut: Future<Output = Outcome<Value>> + Send + 'static,
{
    fn kind(&self) -> SchemaKind {
        SchemaKind::Custom
    }

    fn message(&self) -> &str {
        &self.message
    }

    fn validate<'a>(&'a self, input: &'a Value) -> Validation<'a> {
        Validation::Deferred(Box::pin((self.check)(input.clone())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{custom, custom_async};
    use serde_json::json;

    #[test]
    fn sync_closure_answers_immediately() {
        let even = custom("Expected an even number", |input| match input.as_i64() {
            Some(n) if n % 2 == 0 => Outcome::success(input.clone()),
            _ => Outcome::fail("Expected an even number"),
        });
        assert_eq!(even.kind(), SchemaKind::Custom);
        assert_eq!(even.message(), "Expected an even number");

        let four = json!(4);
        let validation = even.validate(&four);
        assert!(validation.is_ready());
        assert_eq!(validation.resolve(), Outcome::success(json!(4)));
        assert_eq!(
            even.validate(&json!(3)).resolve(),
            Outcome::fail("Expected an even number")
        );
    }

    #[test]
    fn async_closure_always_defers() {
        let upper = custom_async("Expected text", |input: Value| async move {
            match input.as_str() {
                Some(text) => Outcome::success(json!(text.to_uppercase())),
                None => Outcome::fail("Expected text"),
            }
        });
        let input = json!("abc");
        let validation = upper.validate(&input);
        assert!(!validation.is_ready());
        assert_eq!(validation.resolve(), Outcome::success(json!("ABC")));
    }

    #[tokio::test]
    async fn async_closure_settles_on_runtime() {
        let slow = custom_async("slow", |input: Value| async move {
            tokio::task::yield_now().await;
            Outcome::success(input)
        });
        assert_eq!(slow.validate(&json!(1)).settle().await, Outcome::success(json!(1)));
    }
}
