//! Child-process lookup through `pgrep`.

pub mod operations;

pub use operations::{PGREP_PROGRAM, build_pgrep_args, call_pgrep, parse_pgrep_output};
