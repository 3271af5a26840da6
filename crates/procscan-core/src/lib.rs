//! procscan-core: open file and child process discovery for Unix systems
//!
//! Both lookups shell out to a standard utility through an injected
//! [`Invoker`], so callers decide how programs are run and tests can replace
//! the process layer entirely.
//!
//! # Main Entry Points
//!
//! - [`lsof`] - Open files of one process or of all processes
//! - [`pgrep`] - Immediate children of a process
//! - [`invoke`] - The invoker capability and its real implementation
//! - [`config`] - Configuration management

pub mod config;
pub mod errors;
pub mod invoke;
pub mod logging;
pub mod lsof;
pub mod pgrep;
pub mod process;

// Re-export commonly used types at crate root for convenience
pub use config::ProcscanConfig;
pub use errors::{ConfigError, ProcscanError};
pub use invoke::{
    CallContext, CancellationToken, CommandOutput, FakeInvoker, InvokeError, Invoker, SystemInvoker,
};
pub use process::Pid;

// Re-export the lookups as the primary API
pub use lsof::call_lsof;
pub use pgrep::call_pgrep;

// Re-export logging initialization
pub use logging::init_logging;
