use crate::errors::ProcscanError;

#[derive(Debug, thiserror::Error)]
pub enum InvokeError {
    #[error("Program '{program}' not found")]
    NotFound { program: String },

    #[error("exit status {code}")]
    ExitStatus { program: String, code: i32 },

    #[error("Program '{program}' was terminated by a signal")]
    Signaled { program: String },

    #[error("Program '{program}' timed out after {timeout_ms}ms")]
    Timeout { program: String, timeout_ms: u64 },

    #[error("Invocation of '{program}' was cancelled")]
    Cancelled { program: String },

    #[error("Failed to spawn '{program}': {source}")]
    SpawnFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error while running '{program}': {source}")]
    Io {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

impl InvokeError {
    /// Name of the program the failed invocation targeted.
    pub fn program(&self) -> &str {
        match self {
            InvokeError::NotFound { program }
            | InvokeError::ExitStatus { program, .. }
            | InvokeError::Signaled { program }
            | InvokeError::Timeout { program, .. }
            | InvokeError::Cancelled { program }
            | InvokeError::SpawnFailed { program, .. }
            | InvokeError::Io { program, .. } => program,
        }
    }

    /// True if the program ran to completion and exited with `code`.
    pub fn is_exit_status(&self, code: i32) -> bool {
        matches!(self, InvokeError::ExitStatus { code: c, .. } if *c == code)
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, InvokeError::NotFound { .. })
    }
}

impl ProcscanError for InvokeError {
    fn error_code(&self) -> &'static str {
        match self {
            InvokeError::NotFound { .. } => "INVOKE_PROGRAM_NOT_FOUND",
            InvokeError::ExitStatus { .. } => "INVOKE_EXIT_STATUS",
            InvokeError::Signaled { .. } => "INVOKE_SIGNALED",
            InvokeError::Timeout { .. } => "INVOKE_TIMEOUT",
            InvokeError::Cancelled { .. } => "INVOKE_CANCELLED",
            InvokeError::SpawnFailed { .. } => "INVOKE_SPAWN_FAILED",
            InvokeError::Io { .. } => "INVOKE_IO_ERROR",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(
            self,
            InvokeError::NotFound { .. } | InvokeError::Cancelled { .. }
        )
    }
}
