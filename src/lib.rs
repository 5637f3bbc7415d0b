//! # readbench
//!
//! Native sequential file-read throughput benchmark.
//!
//! The core is a [`ReadSession`]: an open file plus a fixed-size buffer that
//! is drained front to back in buffer-sized reads. Sessions are exposed to
//! an Android caller through JNI entry points ([`bridge`]) that pass opaque
//! integer handles issued by a [`SessionRegistry`].
//!
//! ## Features
//!
//! - **Read sessions**: `fread`-style chunk loop with explicit open-failure state
//! - **JNI bridge**: `prepareNative` / `startNative` / `teardownNative` / `closeNative`
//! - **Strategies**: plain, buffered, memory-mapped, and session reads
//! - **Sweeps**: timing every strategy across a range of buffer sizes

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
// Note: unsafe is needed for memory-mapped I/O (memmap2) and JNI exports
#![warn(unsafe_code)]

pub mod bench;
pub mod bridge;
pub mod cli;
pub mod error;
pub mod io;
pub mod logging;
pub mod session;
pub mod strategy;

// Re-export commonly used types at crate root
pub use error::{Error, Result};

// Re-export session types
pub use session::{ReadSession, RunStats, SessionHandle, SessionRegistry, StopReason};

// Re-export strategy types
pub use strategy::{ReadStrategy, available_strategies, create_strategy};

// Re-export benchmark types
pub use bench::{BenchConfig, BenchResult, BenchRunner, SizeStep};

// Re-export CLI types
pub use cli::{Cli, Commands, OutputFormat};
