//! Buffer-size sweep benchmark.
//!
//! For every buffer size in the configured range the runner times each
//! selected [`ReadStrategy`](crate::strategy::ReadStrategy) draining the
//! same file, and reports the average cost per strategy and size.

pub mod config;
pub mod report;
pub mod runner;

pub use config::{BenchConfig, SizeStep};
pub use report::{BenchResult, format_report};
pub use runner::BenchRunner;
