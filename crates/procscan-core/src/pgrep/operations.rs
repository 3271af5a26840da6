use tracing::{debug, info};

use crate::invoke::{CallContext, InvokeError, Invoker};
use crate::process::Pid;

pub const PGREP_PROGRAM: &str = "pgrep";

/// Build the `pgrep` argument vector: exactly `-P <parent>`.
pub fn build_pgrep_args(parent: Pid) -> Vec<String> {
    vec!["-P".to_string(), parent.to_string()]
}

/// Parse one decimal PID per line, in order.
///
/// Empty lines and lines that are not a 32-bit decimal integer are skipped.
pub fn parse_pgrep_output(stdout: &[u8]) -> Vec<Pid> {
    String::from_utf8_lossy(stdout)
        .split('\n')
        .filter(|line| !line.is_empty())
        .filter_map(|line| line.parse::<Pid>().ok())
        .collect()
}

/// List the immediate children of `parent`.
///
/// Any invoker failure is returned as-is, including exit status 1, which
/// `pgrep` uses when no process matched.
pub fn call_pgrep(
    ctx: &CallContext,
    invoker: &dyn Invoker,
    parent: Pid,
) -> Result<Vec<Pid>, InvokeError> {
    let args = build_pgrep_args(parent);
    let stdout = invoker
        .command_with_context(ctx, PGREP_PROGRAM, &args)
        .into_result()
        .inspect_err(|e| {
            debug!(
                event = "core.pgrep.call_failed",
                parent = %parent,
                error = %e
            );
        })?;

    let children = parse_pgrep_output(&stdout);
    info!(
        event = "core.pgrep.call_completed",
        parent = %parent,
        child_count = children.len()
    );
    Ok(children)
}
