//! Open-file lookup through `lsof`.

pub mod operations;

pub use operations::{LSOF_PROGRAM, build_lsof_args, call_lsof, parse_lsof_output};
