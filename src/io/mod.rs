//! I/O utilities for readbench.
//!
//! Provides the chunk fill primitive shared by every read loop, memory
//! mapping, and creation of the sized files the benchmark reads.

pub mod file;
pub mod reader;

pub use file::{BenchFile, ensure_file};
pub use reader::{map_file, read_chunk};
