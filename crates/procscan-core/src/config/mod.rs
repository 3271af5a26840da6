//! # Configuration System
//!
//! Hierarchical TOML configuration for procscan.
//!
//! ## Configuration Hierarchy
//!
//! Configuration is loaded in the following order (later sources override earlier ones):
//! 1. **Hardcoded defaults** - Built-in fallback values
//! 2. **User config** - `~/.procscan/config.toml` (global user preferences)
//! 3. **Project config** - `./.procscan/config.toml` (directory-specific overrides)
//! 4. **CLI arguments** - Command-line flags (highest priority)
//!
//! ## Usage Example
//!
//! ```toml
//! # ~/.procscan/config.toml
//! [invoke]
//! timeout_ms = 5000
//!
//! [programs]
//! lsof = "/usr/sbin/lsof"
//! ```
//!
//! ## Loading Configuration
//!
//! ```rust,no_run
//! use procscan_core::config::ProcscanConfig;
//! use procscan_core::invoke::SystemInvoker;
//!
//! fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ProcscanConfig::load_hierarchy()?;
//!     let invoker = SystemInvoker::from_config(&config);
//!     Ok(())
//! }
//! ```

pub mod defaults;
pub mod loading;
pub mod types;
pub mod validation;

pub use types::{InvokeConfig, ProcscanConfig};
pub use validation::validate_config;

impl ProcscanConfig {
    /// Load configuration from the hierarchy of config files.
    ///
    /// See [`loading::load_hierarchy`] for details.
    pub fn load_hierarchy() -> Result<Self, crate::errors::ConfigError> {
        loading::load_hierarchy()
    }

    /// Validate the configuration.
    ///
    /// See [`validation::validate_config`] for details.
    pub fn validate(&self) -> Result<(), crate::errors::ConfigError> {
        validation::validate_config(self)
    }
}
