//! Invoker backed by real child processes.

use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use tracing::{debug, warn};

use super::errors::InvokeError;
use super::traits::Invoker;
use super::types::{CallContext, CommandOutput};
use crate::config::ProcscanConfig;
use crate::config::defaults::DEFAULT_INVOKE_TIMEOUT_MS;
use crate::errors::ProcscanError;

/// How often a running child is checked for exit, deadline and cancellation.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

enum WaitOutcome {
    Exited(ExitStatus),
    TimedOut,
    Cancelled,
}

enum DrainOutcome {
    Finished(std::io::Result<Vec<u8>>),
    TimedOut,
    Cancelled,
}

/// Runs programs with `std::process::Command`.
///
/// Programs are looked up on `PATH` unless an explicit path was registered
/// for that name. Stdin is null, stderr is discarded and stdout is captured.
#[derive(Debug, Clone)]
pub struct SystemInvoker {
    timeout: Option<Duration>,
    program_paths: HashMap<String, PathBuf>,
}

impl SystemInvoker {
    pub fn new() -> Self {
        Self {
            timeout: Some(Duration::from_millis(DEFAULT_INVOKE_TIMEOUT_MS)),
            program_paths: HashMap::new(),
        }
    }

    /// Build an invoker from the `[invoke]` and `[programs]` config sections.
    pub fn from_config(config: &ProcscanConfig) -> Self {
        Self {
            timeout: Some(Duration::from_millis(
                config.invoke.effective_timeout_ms(),
            )),
            program_paths: config.programs.clone(),
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Use `path` whenever `name` is invoked instead of searching `PATH`.
    pub fn with_program_path(mut self, name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.program_paths.insert(name.into(), path.into());
        self
    }

    fn resolve_program(&self, name: &str) -> Result<PathBuf, InvokeError> {
        if let Some(path) = self.program_paths.get(name) {
            if path.is_file() {
                return Ok(path.clone());
            }
            debug!(
                event = "core.invoke.override_missing",
                program = name,
                path = %path.display()
            );
            return Err(InvokeError::NotFound {
                program: name.to_string(),
            });
        }

        which::which(name).map_err(|_| InvokeError::NotFound {
            program: name.to_string(),
        })
    }

    fn spawn(&self, path: &Path, name: &str, args: &[String]) -> Result<Child, InvokeError> {
        Command::new(path)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    InvokeError::NotFound {
                        program: name.to_string(),
                    }
                } else {
                    InvokeError::SpawnFailed {
                        program: name.to_string(),
                        source: e,
                    }
                }
            })
    }
}

impl Default for SystemInvoker {
    fn default() -> Self {
        Self::new()
    }
}

/// Poll `child` until it exits, the deadline passes or the context is cancelled.
///
/// On timeout or cancellation the child is killed and reaped before returning.
fn wait_for_exit(child: &mut Child, ctx: &CallContext) -> std::io::Result<WaitOutcome> {
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(WaitOutcome::Exited(status));
        }
        if ctx.is_cancelled() {
            kill_and_reap(child);
            return Ok(WaitOutcome::Cancelled);
        }
        if ctx.is_expired() {
            kill_and_reap(child);
            return Ok(WaitOutcome::TimedOut);
        }
        thread::sleep(POLL_INTERVAL);
    }
}

/// Wait for the stdout reader to hand over the captured bytes.
///
/// Descendants of the child inherit its stdout, so the pipe can stay open
/// after the child itself exited. The context keeps applying until the
/// reader finishes.
fn wait_for_stdout(
    rx: &Receiver<std::io::Result<Vec<u8>>>,
    ctx: &CallContext,
) -> DrainOutcome {
    loop {
        let wait = ctx
            .remaining()
            .map_or(POLL_INTERVAL, |left| left.min(POLL_INTERVAL));
        match rx.recv_timeout(wait) {
            Ok(result) => return DrainOutcome::Finished(result),
            Err(RecvTimeoutError::Disconnected) => {
                return DrainOutcome::Finished(Err(std::io::Error::other(
                    "stdout reader thread exited without a result",
                )));
            }
            Err(RecvTimeoutError::Timeout) => {}
        }
        if ctx.is_cancelled() {
            return DrainOutcome::Cancelled;
        }
        if ctx.is_expired() {
            return DrainOutcome::TimedOut;
        }
    }
}

fn kill_and_reap(child: &mut Child) {
    // The child may have exited between try_wait and kill.
    if let Err(e) = child.kill() {
        debug!(event = "core.invoke.kill_failed", error = %e);
    }
    if let Err(e) = child.wait() {
        debug!(event = "core.invoke.reap_failed", error = %e);
    }
}

fn log_failure(name: &str, error: &InvokeError) {
    match error {
        InvokeError::ExitStatus { .. } | InvokeError::NotFound { .. } => debug!(
            event = "core.invoke.failed",
            program = name,
            error_code = error.error_code(),
            error = %error
        ),
        _ => warn!(
            event = "core.invoke.failed",
            program = name,
            error_code = error.error_code(),
            error = %error
        ),
    }
}

impl Invoker for SystemInvoker {
    fn command_with_context(
        &self,
        ctx: &CallContext,
        name: &str,
        args: &[String],
    ) -> CommandOutput {
        debug!(event = "core.invoke.started", program = name, args = ?args);

        let fail = |error: InvokeError| {
            log_failure(name, &error);
            CommandOutput::failure(Vec::new(), error)
        };

        if ctx.is_cancelled() {
            return fail(InvokeError::Cancelled {
                program: name.to_string(),
            });
        }

        let path = match self.resolve_program(name) {
            Ok(path) => path,
            Err(e) => return fail(e),
        };

        let mut child = match self.spawn(&path, name, args) {
            Ok(child) => child,
            Err(e) => return fail(e),
        };

        // Drain stdout concurrently so a chatty child cannot block on a full pipe.
        let reader = child.stdout.take().map(|mut stdout| {
            let (tx, rx) = mpsc::channel();
            thread::spawn(move || {
                let mut buf = Vec::new();
                // The receiver is gone once the call gave up on the output.
                let _ = tx.send(stdout.read_to_end(&mut buf).map(|_| buf));
            });
            rx
        });

        let outcome = match wait_for_exit(&mut child, ctx) {
            Ok(outcome) => outcome,
            Err(e) => {
                kill_and_reap(&mut child);
                return fail(InvokeError::Io {
                    program: name.to_string(),
                    source: e,
                });
            }
        };

        let timed_out = || InvokeError::Timeout {
            program: name.to_string(),
            timeout_ms: ctx
                .timeout()
                .map(|t| t.as_millis() as u64)
                .unwrap_or_default(),
        };
        let cancelled = || InvokeError::Cancelled {
            program: name.to_string(),
        };

        let status = match outcome {
            WaitOutcome::Exited(status) => status,
            // The reader is left detached; a killed child may leave
            // descendants holding the pipe open.
            WaitOutcome::TimedOut => return fail(timed_out()),
            WaitOutcome::Cancelled => return fail(cancelled()),
        };

        let drained = match &reader {
            Some(rx) => wait_for_stdout(rx, ctx),
            None => DrainOutcome::Finished(Ok(Vec::new())),
        };
        let stdout = match drained {
            DrainOutcome::Finished(Ok(buf)) => buf,
            DrainOutcome::Finished(Err(e)) => {
                return fail(InvokeError::Io {
                    program: name.to_string(),
                    source: e,
                });
            }
            DrainOutcome::TimedOut => return fail(timed_out()),
            DrainOutcome::Cancelled => return fail(cancelled()),
        };

        if status.success() {
            debug!(
                event = "core.invoke.completed",
                program = name,
                stdout_bytes = stdout.len()
            );
            return CommandOutput::success(stdout);
        }

        let error = match status.code() {
            Some(code) => InvokeError::ExitStatus {
                program: name.to_string(),
                code,
            },
            None => InvokeError::Signaled {
                program: name.to_string(),
            },
        };
        log_failure(name, &error);
        CommandOutput::failure(stdout, error)
    }

    fn default_timeout(&self) -> Option<Duration> {
        self.timeout
    }
}
