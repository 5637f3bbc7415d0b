//! Command-line argument parsing.
//!
//! Defines the CLI structure using clap derive macros.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// readbench: sequential file-read throughput benchmark.
///
/// Times several ways of reading a file front to back across a range of
/// buffer sizes, including the native read-session loop used by the
/// Android bridge.
#[derive(Parser, Debug)]
#[command(name = "readbench")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json).
    #[arg(long, default_value = "text", global = true)]
    pub format: String,

    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a buffer-size sweep over the read strategies.
    Run {
        /// Size of the generated test file in MiB.
        #[arg(long, default_value = "64")]
        file_size_mb: u64,

        /// Timed runs per strategy and buffer size.
        #[arg(short = 'n', long, default_value = "3")]
        times: u32,

        /// First buffer size in bytes.
        #[arg(long, default_value = "1024")]
        from: usize,

        /// Last buffer size in bytes (inclusive).
        #[arg(long, default_value = "1048576")]
        to: usize,

        /// Buffer size growth: `+N` adds N bytes, `xN` multiplies by N.
        #[arg(long, default_value = "x2")]
        step: String,

        /// Strategy to include (repeatable; default: all).
        #[arg(short, long = "strategy")]
        strategies: Vec<String>,

        /// Read this file instead of generating one.
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Drain a file once through a native read session.
    Drain {
        /// File to read.
        file: PathBuf,

        /// Read buffer size in bytes.
        #[arg(short, long, default_value = "4096")]
        buffer_size: usize,

        /// Number of runs on the same session (later runs start at EOF).
        #[arg(long, default_value = "1")]
        repeat: u32,
    },

    /// List available read strategies.
    Strategies,
}
