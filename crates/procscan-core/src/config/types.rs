//! Configuration type definitions.
//!
//! # Example Configuration
//!
//! ```toml
//! [invoke]
//! timeout_ms = 3000
//!
//! [programs]
//! lsof = "/usr/sbin/lsof"
//! pgrep = "/usr/bin/pgrep"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Main configuration loaded from TOML config files.
///
/// Loaded from `~/.procscan/config.toml` and then `./.procscan/config.toml`;
/// project values override user values.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProcscanConfig {
    /// Settings for running external programs
    #[serde(default)]
    pub invoke: InvokeConfig,

    /// Explicit program paths, keyed by program name (`lsof`, `pgrep`).
    /// Programs without an entry are looked up on `PATH`.
    #[serde(default)]
    pub programs: HashMap<String, PathBuf>,
}

/// Invocation settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct InvokeConfig {
    /// Deadline for a single external program run, in milliseconds.
    /// Default: 3000ms.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

impl InvokeConfig {
    /// Configured timeout, or the built-in default when unset.
    pub fn effective_timeout_ms(&self) -> u64 {
        self.timeout_ms
            .unwrap_or(super::defaults::DEFAULT_INVOKE_TIMEOUT_MS)
    }
}
