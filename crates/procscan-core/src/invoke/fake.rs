//! Scripted invoker for tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use super::errors::InvokeError;
use super::traits::Invoker;
use super::types::{CallContext, CommandOutput};

type Responder = Box<dyn Fn(&[String]) -> CommandOutput + Send + Sync>;

/// One call observed by a [`FakeInvoker`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub program: String,
    pub args: Vec<String>,
    pub timeout: Option<Duration>,
}

/// Invoker that never spawns anything.
///
/// Each program name is bound to a responder; calls to unbound programs fail
/// with [`InvokeError::NotFound`]. Every call is recorded.
#[derive(Default)]
pub struct FakeInvoker {
    responders: HashMap<String, Responder>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl FakeInvoker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer calls to `program` with the output of `responder`.
    pub fn respond<F>(mut self, program: &str, responder: F) -> Self
    where
        F: Fn(&[String]) -> CommandOutput + Send + Sync + 'static,
    {
        self.responders
            .insert(program.to_string(), Box::new(responder));
        self
    }

    /// Answer calls to `program` with a successful run printing `stdout`.
    pub fn respond_stdout(self, program: &str, stdout: &str) -> Self {
        let stdout = stdout.to_string();
        self.respond(program, move |_| CommandOutput::success(stdout.clone()))
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

impl Invoker for FakeInvoker {
    fn command_with_context(
        &self,
        ctx: &CallContext,
        name: &str,
        args: &[String],
    ) -> CommandOutput {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(RecordedCall {
                program: name.to_string(),
                args: args.to_vec(),
                timeout: ctx.timeout(),
            });
        }

        match self.responders.get(name) {
            Some(responder) => responder(args),
            None => CommandOutput::failure(
                Vec::new(),
                InvokeError::NotFound {
                    program: name.to_string(),
                },
            ),
        }
    }
}
