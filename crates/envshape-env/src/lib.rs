//! # envshape-env — Validated Environment Configuration
//!
//! Reads an environment snapshot and validates it against a [`Shape`] in one
//! call, returning either the coerced configuration record or an error whose
//! message lists the keys that failed.
//!
//! ```
//! use envshape_env::env_from;
//! use envshape_schema::{boolean, number, optional, string, Shape};
//! use serde_json::json;
//!
//! let shape = Shape::new()
//!     .field("PORT", number())
//!     .field("DEBUG", boolean())
//!     .field("LOG_LEVEL", optional(string()));
//! let config = env_from(shape, &json!({"PORT": "8080", "DEBUG": "true"})).unwrap();
//! assert_eq!(config, json!({"PORT": 8080, "DEBUG": true, "LOG_LEVEL": null}));
//! ```
//!
//! ## Sources
//!
//! The ambient environment depends on the [`Runtime`] the crate was built
//! for: native and WASI targets read the process environment, freestanding
//! WebAssembly reads nothing. Any [`EnvSource`] can be supplied instead
//! through [`env_with`] or [`EnvLoader`].
//!
//! ## Logging
//!
//! Emits `tracing` events at `debug` (runtime chosen, snapshot size,
//! rejected input) and `warn` (unusable process variables). Values are never
//! logged. Installing a subscriber is left to the application.

pub mod error;
pub mod loader;
pub mod runtime;
pub mod source;

pub use envshape_schema::Shape;
pub use error::EnvError;
pub use loader::{
    env, env_as, env_async, env_from, env_from_as, env_from_async, env_with, EnvLoader,
};
pub use runtime::Runtime;
pub use source::{
    snapshot_to_value, DotenvFile, EmptyEnv, EnvSnapshot, EnvSource, Layered, MapEnv, Prefixed,
    ProcessEnv,
};
