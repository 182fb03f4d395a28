//! Host runtime detection and the source each runtime reads from.
//!
//! Detection is resolved from the compilation target, once, and maps to a
//! provider through [`Runtime::source`]. Nothing here inspects the host at
//! validation time.

use std::fmt;
use std::sync::Arc;

use crate::source::{EmptyEnv, EnvSource, ProcessEnv};

/// The kind of host this binary was built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Runtime {
    /// A native OS process with a regular environment block.
    Native,
    /// WebAssembly under WASI, which exposes an environment.
    Wasi,
    /// Freestanding WebAssembly (e.g. in a browser) with no environment.
    Browser,
    /// Anything else.
    Unknown,
}

impl Runtime {
    /// The runtime of the current compilation target.
    pub fn detect() -> Self {
        if cfg!(target_os = "wasi") {
            Self::Wasi
        } else if cfg!(all(target_family = "wasm", target_os = "unknown")) {
            Self::Browser
        } else if cfg!(any(unix, windows)) {
            Self::Native
        } else {
            Self::Unknown
        }
    }

    /// The environment source used on this runtime.
    pub fn source(self) -> Arc<dyn EnvSource> {
        match self {
            Self::Native | Self::Wasi => Arc::new(ProcessEnv),
            Self::Browser | Self::Unknown => Arc::new(EmptyEnv),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Native => "native",
            Self::Wasi => "wasi",
            Self::Browser => "browser",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
