//! # Environment Sources
//!
//! An [`EnvSource`] produces a point-in-time snapshot of string keys to
//! optional string values. Validation never reads the host environment
//! directly; it only ever sees a snapshot, which makes the origin (process,
//! `.env` file, test fixture) irrelevant to the schemas.
//!
//! ## Providers
//!
//! | Source | Origin |
//! |--------|--------|
//! | [`ProcessEnv`] | the current process environment |
//! | [`DotenvFile`] | a `.env` file parsed with `dotenvy` |
//! | [`MapEnv`] | an in-memory map (tests, injection) |
//! | [`EmptyEnv`] | nothing, for hosts without an environment |
//! | [`Layered`] | several sources, earlier layers winning per key |
//! | [`Prefixed`] | another source, filtered to one key prefix |

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::error::EnvError;

/// Snapshot of an environment. `None` marks a key whose value is present but
/// unusable (for example not valid UTF-8).
pub type EnvSnapshot = BTreeMap<String, Option<String>>;

/// A provider of environment snapshots.
pub trait EnvSource: Send + Sync {
    /// Short name used in logs and errors.
    fn name(&self) -> &str;

    /// Read the current environment.
    fn snapshot(&self) -> Result<EnvSnapshot, EnvError>;
}

impl<S: EnvSource + ?Sized> EnvSource for Arc<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn snapshot(&self) -> Result<EnvSnapshot, EnvError> {
        (**self).snapshot()
    }
}

impl<S: EnvSource + ?Sized> EnvSource for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn snapshot(&self) -> Result<EnvSnapshot, EnvError> {
        (**self).snapshot()
    }
}

/// Convert a snapshot into the JSON record the schemas validate.
///
/// Present values become strings; `None` becomes `null`, which schemas treat
/// exactly like a missing key.
pub fn snapshot_to_value(snapshot: &EnvSnapshot) -> Value {
    let record: Map<String, Value> = snapshot
        .iter()
        .map(|(key, value)| {
            let value = value.clone().map_or(Value::Null, Value::String);
            (key.clone(), value)
        })
        .collect();
    Value::Object(record)
}

/// The environment of the current process.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn name(&self) -> &str {
        "process"
    }

    fn snapshot(&self) -> Result<EnvSnapshot, EnvError> {
        let mut snapshot = EnvSnapshot::new();
        for (key, value) in std::env::vars_os() {
            let Ok(key) = key.into_string() else {
                tracing::warn!("skipping environment variable with non-UTF-8 name");
                continue;
            };
            let value = match value.into_string() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(key = %key, "environment value is not valid UTF-8");
                    None
                }
            };
            snapshot.insert(key, value);
        }
        Ok(snapshot)
    }
}

/// A host with no environment at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyEnv;

impl EnvSource for EmptyEnv {
    fn name(&self) -> &str {
        "empty"
    }

    fn snapshot(&self) -> Result<EnvSnapshot, EnvError> {
        Ok(EnvSnapshot::new())
    }
}

/// A fixed, in-memory environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapEnv {
    vars: EnvSnapshot,
}

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value`.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), Some(value.into()));
        self
    }

    /// Mark `key` as present without a usable value.
    pub fn unset(mut self, key: impl Into<String>) -> Self {
        self.vars.insert(key.into(), None);
        self
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapEnv {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(MapEnv::new(), |env, (key, value)| env.set(key, value))
    }
}

impl EnvSource for MapEnv {
    fn name(&self) -> &str {
        "map"
    }

    fn snapshot(&self) -> Result<EnvSnapshot, EnvError> {
        Ok(self.vars.clone())
    }
}

/// Variables declared in a `.env` file.
///
/// The file is read on every snapshot, so edits are picked up without
/// rebuilding the source. The process environment is never modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DotenvFile {
    path: PathBuf,
}

impl DotenvFile {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_error(&self, reason: impl ToString) -> EnvError {
        EnvError::Dotenv {
            path: self.path.display().to_string(),
            reason: reason.to_string(),
        }
    }
}

impl EnvSource for DotenvFile {
    fn name(&self) -> &str {
        "dotenv"
    }

    fn snapshot(&self) -> Result<EnvSnapshot, EnvError> {
        let entries = dotenvy::from_path_iter(&self.path).map_err(|e| self.load_error(e))?;
        let mut snapshot = EnvSnapshot::new();
        for entry in entries {
            let (key, value) = entry.map_err(|e| self.load_error(e))?;
            snapshot.insert(key, Some(value));
        }
        Ok(snapshot)
    }
}

/// Several sources merged; for each key the first layer that has it wins.
#[derive(Default, Clone)]
pub struct Layered {
    layers: Vec<Arc<dyn EnvSource>>,
}

impl Layered {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a lower-priority layer.
    pub fn layer<S: EnvSource + 'static>(self, source: S) -> Self {
        self.layer_shared(Arc::new(source))
    }

    /// [`layer`](Self::layer) for an already shared source.
    pub fn layer_shared(mut self, source: Arc<dyn EnvSource>) -> Self {
        self.layers.push(source);
        self
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl std::fmt::Debug for Layered {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.layers.iter().map(|layer| layer.name()).collect();
        f.debug_struct("Layered").field("layers", &names).finish()
    }
}

impl EnvSource for Layered {
    fn name(&self) -> &str {
        "layered"
    }

    fn snapshot(&self) -> Result<EnvSnapshot, EnvError> {
        let mut merged = EnvSnapshot::new();
        for layer in &self.layers {
            for (key, value) in layer.snapshot()? {
                merged.entry(key).or_insert(value);
            }
        }
        Ok(merged)
    }
}

/// Keys of the inner source that start with a prefix, with the prefix
/// removed. Keys without the prefix are dropped.
#[derive(Clone)]
pub struct Prefixed {
    inner: Arc<dyn EnvSource>,
    prefix: String,
}

impl Prefixed {
    pub fn new<S: EnvSource + 'static>(inner: S, prefix: impl Into<String>) -> Self {
        Self::shared(Arc::new(inner), prefix)
    }

    pub fn shared(inner: Arc<dyn EnvSource>, prefix: impl Into<String>) -> Self {
        Self {
            inner,
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl std::fmt::Debug for Prefixed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Prefixed")
            .field("inner", &self.inner.name())
            .field("prefix", &self.prefix)
            .finish()
    }
}

impl EnvSource for Prefixed {
    fn name(&self) -> &str {
        "prefixed"
    }

    fn snapshot(&self) -> Result<EnvSnapshot, EnvError> {
        let snapshot = self
            .inner
            .snapshot()?
            .into_iter()
            .filter_map(|(key, value)| {
                key.strip_prefix(self.prefix.as_str())
                    .filter(|rest| !rest.is_empty())
                    .map(|rest| (rest.to_string(), value))
            })
            .collect();
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn snapshot_to_value_maps_none_to_null() {
        let snapshot = MapEnv::new().set("PORT", "8080").unset("BROKEN").snapshot().unwrap();
        assert_eq!(
            snapshot_to_value(&snapshot),
            json!({"PORT": "8080", "BROKEN": null})
        );
    }

    #[test]
    fn map_env_from_pairs() {
        let env: MapEnv = [("A", "1"), ("B", "2")].into_iter().collect();
        let snapshot = env.snapshot().unwrap();
        assert_eq!(snapshot.get("A"), Some(&Some("1".to_string())));
        assert_eq!(snapshot.len(), 2);
    }

    #[test]
    fn empty_env_has_no_keys() {
        assert!(EmptyEnv.snapshot().unwrap().is_empty());
    }

    #[test]
    fn process_env_sees_set_variable() {
        std::env::set_var("ENVSHAPE_SOURCE_TEST_VAR", "present");
        let snapshot = ProcessEnv.snapshot().unwrap();
        std::env::remove_var("ENVSHAPE_SOURCE_TEST_VAR");
        assert_eq!(
            snapshot.get("ENVSHAPE_SOURCE_TEST_VAR"),
            Some(&Some("present".to_string()))
        );
    }

    #[test]
    fn layered_prefers_earlier_layers() {
        let layered = Layered::new()
            .layer(MapEnv::new().set("PORT", "9000"))
            .layer(MapEnv::new().set("PORT", "8080").set("HOST", "localhost"));
        assert_eq!(layered.len(), 2);
        let snapshot = layered.snapshot().unwrap();
        assert_eq!(snapshot.get("PORT"), Some(&Some("9000".to_string())));
        assert_eq!(snapshot.get("HOST"), Some(&Some("localhost".to_string())));
    }

    #[test]
    fn prefixed_strips_and_filters() {
        let source = Prefixed::new(
            MapEnv::new()
                .set("APP_PORT", "8080")
                .set("APP_", "empty-rest")
                .set("OTHER", "x"),
            "APP_",
        );
        let snapshot = source.snapshot().unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.get("PORT"), Some(&Some("8080".to_string())));
    }

    #[test]
    fn dotenv_file_parses_entries() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# comment").unwrap();
        writeln!(file, "PORT=8080").unwrap();
        writeln!(file, "GREETING=\"hello world\"").unwrap();
        let snapshot = DotenvFile::new(file.path()).snapshot().unwrap();
        assert_eq!(snapshot.get("PORT"), Some(&Some("8080".to_string())));
        assert_eq!(snapshot.get("GREETING"), Some(&Some("hello world".to_string())));
    }

    #[test]
    fn missing_dotenv_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = DotenvFile::new(dir.path().join("absent.env")).snapshot().unwrap_err();
        assert!(matches!(err, EnvError::Dotenv { .. }), "got {err}");
    }

    #[test]
    fn layered_propagates_layer_failure() {
        let dir = tempfile::tempdir().unwrap();
        let layered = Layered::new()
            .layer(MapEnv::new().set("A", "1"))
            .layer(DotenvFile::new(dir.path().join("absent.env")));
        assert!(layered.snapshot().is_err());
    }
}
