use std::time::Duration;

use clap::ArgMatches;
use tracing::warn;

use procscan_core::{CallContext, ProcscanConfig, ProcscanError, SystemInvoker};

/// Load config, falling back to defaults with a visible warning on errors.
pub(crate) fn load_config_with_warning() -> ProcscanConfig {
    match ProcscanConfig::load_hierarchy() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Could not load config: {}. Using defaults.\n\
                 Tip: Check ~/.procscan/config.toml and ./.procscan/config.toml for syntax errors.",
                e
            );
            warn!(
                event = "cli.config.load_failed",
                error_code = e.error_code(),
                error = %e,
                "Config load failed, using defaults"
            );
            ProcscanConfig::default()
        }
    }
}

/// Build the invoker and call context for a lookup command.
///
/// `--timeout-ms` takes precedence over the configured timeout.
pub(crate) fn invoker_and_context(matches: &ArgMatches) -> (SystemInvoker, CallContext) {
    let mut config = load_config_with_warning();
    if let Some(timeout_ms) = matches.get_one::<u64>("timeout-ms") {
        config.invoke.timeout_ms = Some(*timeout_ms);
    }

    let timeout = Duration::from_millis(config.invoke.effective_timeout_ms());
    (
        SystemInvoker::from_config(&config),
        CallContext::with_timeout(timeout),
    )
}
