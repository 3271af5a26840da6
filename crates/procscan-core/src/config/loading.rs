//! Configuration loading and merging logic.
//!
//! # Configuration Hierarchy
//!
//! Configuration is loaded in the following order (later sources override earlier ones):
//! 1. **Hardcoded defaults** - Built-in fallback values
//! 2. **User config** - `~/.procscan/config.toml`
//! 3. **Project config** - `./.procscan/config.toml`

use crate::config::defaults::{CONFIG_DIR_NAME, CONFIG_FILE_NAME};
use crate::config::types::{InvokeConfig, ProcscanConfig};
use crate::config::validation::validate_config;
use crate::errors::ConfigError;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Load configuration from the hierarchy of config files.
///
/// Loads and merges configuration from:
/// 1. Default values
/// 2. User config (`~/.procscan/config.toml`)
/// 3. Project config (`./.procscan/config.toml`)
///
/// # Errors
///
/// Returns an error if a file cannot be parsed or validation fails.
/// Missing config files are not errors.
pub fn load_hierarchy() -> Result<ProcscanConfig, ConfigError> {
    let mut paths = Vec::new();
    if let Some(home_dir) = dirs::home_dir() {
        paths.push(config_path_in(&home_dir));
    }
    paths.push(config_path_in(&std::env::current_dir()?));

    load_hierarchy_from(&paths)
}

/// Load and merge the given config files in order, skipping missing ones.
pub fn load_hierarchy_from(paths: &[PathBuf]) -> Result<ProcscanConfig, ConfigError> {
    let mut config = ProcscanConfig::default();

    for path in paths {
        match load_config_file(path) {
            Ok(file_config) => config = merge_configs(config, file_config),
            Err(ConfigError::ConfigNotFound { path }) => {
                debug!(event = "core.config.file_missing", path = %path);
            }
            Err(e) => return Err(e),
        }
    }

    validate_config(&config)?;

    Ok(config)
}

fn config_path_in(dir: &Path) -> PathBuf {
    dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME)
}

/// Load a configuration file from the given path.
///
/// A missing file is `ConfigNotFound`; any other read failure is `IoError`.
fn load_config_file(path: &Path) -> Result<ProcscanConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ConfigError::ConfigNotFound {
            path: path.display().to_string(),
        },
        _ => ConfigError::from(e),
    })?;
    toml::from_str(&content).map_err(|e| ConfigError::ConfigParseError {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Merge two configurations, with override_config taking precedence.
///
/// Optional values replace base values only if present. Program paths are
/// merged per name with the override entry winning.
pub fn merge_configs(base: ProcscanConfig, override_config: ProcscanConfig) -> ProcscanConfig {
    ProcscanConfig {
        invoke: InvokeConfig {
            timeout_ms: override_config.invoke.timeout_ms.or(base.invoke.timeout_ms),
        },
        programs: {
            let mut merged = base.programs;
            for (name, path) in override_config.programs {
                merged.insert(name, path);
            }
            merged
        },
    }
}
