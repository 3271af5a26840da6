//! Default values for configuration types.

/// Default deadline for one external program run.
pub const DEFAULT_INVOKE_TIMEOUT_MS: u64 = 3000;

/// Name of the per-user and per-directory config directory.
pub const CONFIG_DIR_NAME: &str = ".procscan";

/// File name of the config file inside [`CONFIG_DIR_NAME`].
pub const CONFIG_FILE_NAME: &str = "config.toml";
