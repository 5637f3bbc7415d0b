//! CLI layer for readbench.
//!
//! Provides the command-line interface using clap, with commands for
//! running a benchmark sweep, draining a single file through a read
//! session, and listing strategies.

pub mod commands;
pub mod output;
pub mod parser;

pub use commands::execute;
pub use output::OutputFormat;
pub use parser::{Cli, Commands};
