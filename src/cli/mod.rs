//! Command-line interface module.

mod args;
pub mod dump;
pub mod global_report;
pub mod parse;

pub use args::{Cli, Commands};
