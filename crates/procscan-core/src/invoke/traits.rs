//! Invoker trait definition.

use std::time::Duration;

use super::types::{CallContext, CommandOutput};
use crate::config::defaults::DEFAULT_INVOKE_TIMEOUT_MS;

/// Capability to run a named external program and capture its stdout.
///
/// Lookups receive an invoker explicitly instead of spawning processes
/// themselves, so tests can substitute a deterministic fake.
pub trait Invoker: Send + Sync {
    /// Run `name` with `args` under `ctx`.
    ///
    /// Implementations must honor the context's deadline and cancellation
    /// token and report them as [`InvokeError::Timeout`](super::InvokeError::Timeout)
    /// and [`InvokeError::Cancelled`](super::InvokeError::Cancelled).
    fn command_with_context(&self, ctx: &CallContext, name: &str, args: &[String])
    -> CommandOutput;

    /// Timeout applied by [`Invoker::command`]. `None` means no deadline.
    fn default_timeout(&self) -> Option<Duration> {
        Some(Duration::from_millis(DEFAULT_INVOKE_TIMEOUT_MS))
    }

    /// Run `name` with `args` under a context built from [`Invoker::default_timeout`].
    fn command(&self, name: &str, args: &[String]) -> CommandOutput {
        let ctx = match self.default_timeout() {
            Some(timeout) => CallContext::with_timeout(timeout),
            None => CallContext::background(),
        };
        self.command_with_context(&ctx, name, args)
    }
}
