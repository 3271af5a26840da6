use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;

use super::errors::InvokeError;

/// Execution context forwarded verbatim to an [`Invoker`](super::Invoker).
///
/// Carries an optional deadline and a cancellation token. The context itself
/// does nothing; the invoker decides how to honor it.
#[derive(Debug, Clone)]
pub struct CallContext {
    timeout: Option<Duration>,
    deadline: Option<Instant>,
    cancel: CancellationToken,
}

impl CallContext {
    /// Context with no deadline and a fresh, never-cancelled token.
    pub fn background() -> Self {
        Self {
            timeout: None,
            deadline: None,
            cancel: CancellationToken::new(),
        }
    }

    /// Context whose deadline is `timeout` from now.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
            deadline: Some(Instant::now() + timeout),
            cancel: CancellationToken::new(),
        }
    }

    /// Replace the cancellation token with one the caller holds.
    ///
    /// Clones of `token` share its state, so cancelling from another thread
    /// stops an invocation that is already running.
    pub fn with_cancel(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Time left before the deadline, `None` for a context without one.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|d| d.saturating_duration_since(Instant::now()))
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub fn is_expired(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }
}

impl Default for CallContext {
    fn default() -> Self {
        Self::background()
    }
}

/// Captured stdout of an invocation plus an optional failure.
///
/// Output is kept even when the invocation failed, since some tools
/// (`lsof` among them) print useful records and still exit non-zero.
#[derive(Debug)]
pub struct CommandOutput {
    pub stdout: Vec<u8>,
    pub error: Option<InvokeError>,
}

impl CommandOutput {
    pub fn success(stdout: impl Into<Vec<u8>>) -> Self {
        Self {
            stdout: stdout.into(),
            error: None,
        }
    }

    pub fn failure(stdout: impl Into<Vec<u8>>, error: InvokeError) -> Self {
        Self {
            stdout: stdout.into(),
            error: Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Drop captured output on failure.
    pub fn into_result(self) -> Result<Vec<u8>, InvokeError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.stdout),
        }
    }
}
