//! Configuration validation logic.

use crate::config::types::ProcscanConfig;
use crate::errors::ConfigError;

/// Validate a ProcscanConfig, returning an error if any values are invalid.
///
/// # Validation Rules
///
/// - `invoke.timeout_ms` must be greater than zero
/// - Program names and paths under `[programs]` must be non-empty
///
/// # Errors
///
/// Returns `ConfigError::InvalidConfiguration` describing the first violation.
pub fn validate_config(config: &ProcscanConfig) -> Result<(), ConfigError> {
    if config.invoke.timeout_ms == Some(0) {
        return Err(ConfigError::InvalidConfiguration {
            message: "invoke.timeout_ms must be greater than 0".to_string(),
        });
    }

    for (name, path) in &config.programs {
        if name.trim().is_empty() {
            return Err(ConfigError::InvalidConfiguration {
                message: "Program names under [programs] must not be empty".to_string(),
            });
        }
        if path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidConfiguration {
                message: format!("Path for program '{}' must not be empty", name),
            });
        }
    }

    Ok(())
}
