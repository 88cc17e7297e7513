//! Command-line interface definitions and helpers.

mod args;

pub use args::{log_filter, Args};
