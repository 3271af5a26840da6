pub mod types;

pub use types::Pid;
