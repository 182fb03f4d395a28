//! # Environment Entry Point
//!
//! Ties a [`Shape`], an environment snapshot, and the parse driver together
//! into one "read configuration" call.
//!
//! ## Call Forms
//!
//! - [`env`] / [`env_as`] read the ambient environment of the detected
//!   [`Runtime`].
//! - [`env_from`] / [`env_from_as`] validate a caller-supplied record, for
//!   tests and injection. They never touch the host environment.
//! - [`env_with`] reads an explicit [`EnvSource`].
//! - [`EnvLoader`] layers a `.env` file under the primary source and strips
//!   a key prefix before validation.
//!
//! Every form builds a `record` composer from the shape, so a non-object
//! input fails with `"Invalid record"` and field failures render as the
//! failing key names.
//!
//! Validation is synchronous; the `_async` forms exist for shapes containing
//! deferred schemas when the caller is already inside an async runtime.

use std::path::PathBuf;
use std::sync::Arc;

use envshape_core::ParseError;
use envshape_schema::{decode, parse, parse_async, record, Shape};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::EnvError;
use crate::runtime::Runtime;
use crate::source::{snapshot_to_value, DotenvFile, EnvSource, Layered, Prefixed};

/// Validate the ambient environment against `shape`.
///
/// # Errors
///
/// [`EnvError::Validation`] when the environment does not satisfy the shape;
/// other variants when the environment cannot be read.
pub fn env(shape: Shape) -> Result<Value, EnvError> {
    EnvLoader::new().load(shape)
}

/// Validate the ambient environment and deserialize it into `T`.
pub fn env_as<T: DeserializeOwned>(shape: Shape) -> Result<T, EnvError> {
    EnvLoader::new().load_as(shape)
}

/// Async form of [`env`].
pub async fn env_async(shape: Shape) -> Result<Value, EnvError> {
    EnvLoader::new().load_async(shape).await
}

/// Validate an explicit record against `shape`.
///
/// # Errors
///
/// Returns the parse driver's [`ParseError`] unchanged.
pub fn env_from(shape: Shape, raw: &Value) -> Result<Value, ParseError> {
    parse(&record(shape), raw)
}

/// Validate an explicit record and deserialize it into `T`.
pub fn env_from_as<T: DeserializeOwned>(shape: Shape, raw: &Value) -> Result<T, EnvError> {
    let value = env_from(shape, raw)?;
    Ok(decode(value)?)
}

/// Async form of [`env_from`].
pub async fn env_from_async(shape: Shape, raw: &Value) -> Result<Value, ParseError> {
    parse_async(&record(shape), raw).await
}

/// Validate the snapshot of `source` against `shape`.
pub fn env_with(shape: Shape, source: &dyn EnvSource) -> Result<Value, EnvError> {
    let input = read(source)?;
    Ok(env_from(shape, &input)?)
}

/// Builder for environment loading beyond the defaults.
///
/// ```
/// use envshape_env::{EnvLoader, MapEnv};
/// use envshape_schema::{number, Shape};
/// use serde_json::json;
///
/// let loader = EnvLoader::new()
///     .with_source(MapEnv::new().set("APP_PORT", "8080"))
///     .with_prefix("APP_");
/// let config = loader.load(Shape::new().field("PORT", number())).unwrap();
/// assert_eq!(config, json!({"PORT": 8080}));
/// ```
#[derive(Default, Clone)]
pub struct EnvLoader {
    source: Option<Arc<dyn EnvSource>>,
    dotenv: Option<PathBuf>,
    prefix: Option<String>,
}

impl EnvLoader {
    /// A loader reading the environment of the detected runtime.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read from `source` instead of the runtime's environment.
    pub fn with_source<S: EnvSource + 'static>(mut self, source: S) -> Self {
        self.source = Some(Arc::new(source));
        self
    }

    /// Layer a `.env` file under the primary source. Keys already present
    /// in the primary source win.
    pub fn with_dotenv(mut self, path: impl Into<PathBuf>) -> Self {
        self.dotenv = Some(path.into());
        self
    }

    /// Only consider keys starting with `prefix`, and strip it before
    /// validation (`APP_PORT` validates as `PORT`).
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// The effective source after layering and prefix filtering.
    pub fn source(&self) -> Arc<dyn EnvSource> {
        let primary = match &self.source {
            Some(source) => Arc::clone(source),
            None => {
                let runtime = Runtime::detect();
                tracing::debug!(%runtime, "using runtime environment source");
                runtime.source()
            }
        };
        let layered: Arc<dyn EnvSource> = match &self.dotenv {
            Some(path) => Arc::new(
                Layered::new()
                    .layer_shared(primary)
                    .layer(DotenvFile::new(path)),
            ),
            None => primary,
        };
        match &self.prefix {
            Some(prefix) => {
                tracing::debug!(%prefix, "restricting environment to prefixed keys");
                Arc::new(Prefixed::shared(layered, prefix.as_str()))
            }
            None => layered,
        }
    }

    /// Validate the effective environment against `shape`.
    pub fn load(&self, shape: Shape) -> Result<Value, EnvError> {
        env_with(shape, self.source().as_ref())
    }

    /// [`load`](Self::load), then deserialize into `T`.
    pub fn load_as<T: DeserializeOwned>(&self, shape: Shape) -> Result<T, EnvError> {
        let value = self.load(shape)?;
        Ok(decode(value)?)
    }

    /// Async form of [`load`](Self::load).
    pub async fn load_async(&self, shape: Shape) -> Result<Value, EnvError> {
        let input = read(self.source().as_ref())?;
        Ok(env_from_async(shape, &input).await?)
    }
}

impl std::fmt::Debug for EnvLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvLoader")
            .field("source", &self.source.as_ref().map(|s| s.name().to_string()))
            .field("dotenv", &self.dotenv)
            .field("prefix", &self.prefix)
            .finish()
    }
}

fn read(source: &dyn EnvSource) -> Result<Value, EnvError> {
    let snapshot = source.snapshot()?;
    tracing::debug!(source = source.name(), keys = snapshot.len(), "environment snapshot taken");
    Ok(snapshot_to_value(&snapshot))
}
