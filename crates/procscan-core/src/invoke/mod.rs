//! Invoking external programs.
//!
//! [`Invoker`] is the seam every lookup goes through. [`SystemInvoker`] is
//! the real implementation backed by `std::process`; [`FakeInvoker`] answers
//! from scripted responses for tests.

pub mod errors;
pub mod fake;
pub mod system;
pub mod traits;
pub mod types;

pub use errors::InvokeError;
pub use fake::{FakeInvoker, RecordedCall};
pub use system::SystemInvoker;
pub use traits::Invoker;
pub use tokio_util::sync::CancellationToken;
pub use types::{CallContext, CommandOutput};
