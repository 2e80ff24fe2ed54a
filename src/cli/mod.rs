//! Command-line handling.

pub mod args;

pub use args::{parse_args, RunOptions};
