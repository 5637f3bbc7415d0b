//! Sweep execution.

use super::config::BenchConfig;
use super::report::BenchResult;
use crate::error::Result;
use crate::io::BenchFile;
use crate::strategy::{ReadStrategy, available_strategies, create_strategy};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

/// Runs a [`BenchConfig`] against a set of strategies.
///
/// # Examples
///
/// ```
/// use readbench::bench::{BenchConfig, BenchRunner, SizeStep};
///
/// let config = BenchConfig {
///     file_size: 64 * 1024,
///     times: 1,
///     buffer_size_from: 4096,
///     buffer_size_to: 8192,
///     step: SizeStep::Multiply(2),
/// };
/// let mut runner = BenchRunner::new(config).unwrap();
/// let results = runner.run().unwrap();
/// assert_eq!(results.len(), 2 * readbench::strategy::available_strategies().len());
/// ```
pub struct BenchRunner {
    config: BenchConfig,
    strategies: Vec<Box<dyn ReadStrategy>>,
    cancelled: Arc<AtomicBool>,
}

impl BenchRunner {
    /// Creates a runner over every available strategy.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: BenchConfig) -> Result<Self> {
        Self::with_strategies(config, &available_strategies())
    }

    /// Creates a runner over the named strategies, in the given order.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or a strategy name
    /// is unknown.
    pub fn with_strategies<S: AsRef<str>>(config: BenchConfig, names: &[S]) -> Result<Self> {
        config.validate()?;
        let strategies = names
            .iter()
            .map(|name| create_strategy(name.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            config,
            strategies,
            cancelled: Arc::new(AtomicBool::new(false)),
        })
    }

    /// The configuration being run.
    #[must_use]
    pub const fn config(&self) -> &BenchConfig {
        &self.config
    }

    /// Flag that stops the sweep when set; checked between timed runs.
    #[must_use]
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancelled)
    }

    /// Requests cancellation.
    pub fn stop(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Runs the sweep on a temporary file of `config.file_size` bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or a strategy fails.
    pub fn run(&mut self) -> Result<Vec<BenchResult>> {
        let file = BenchFile::temporary(self.config.file_size)?;
        self.run_on(&file)
    }

    /// Runs the sweep on `file`.
    ///
    /// Results for a cancelled sweep cover only the sizes reached.
    ///
    /// # Errors
    ///
    /// Returns an error if a strategy fails to set up or read.
    pub fn run_on(&mut self, file: &BenchFile) -> Result<Vec<BenchResult>> {
        let file_size = file.size()?;
        let mut results = Vec::new();

        for buffer_size in self.config.buffer_sizes() {
            if self.is_cancelled() {
                tracing::info!(buffer_size, "benchmark cancelled");
                break;
            }
            let mut buffer = vec![0u8; buffer_size];
            for index in 0..self.strategies.len() {
                let cost_nanos = self.time_strategy(index, file.path(), &mut buffer)?;
                let result = BenchResult {
                    name: self.strategies[index].name().to_string(),
                    cost_nanos,
                    buffer_size,
                    file_size,
                    times: self.config.times,
                };
                tracing::info!(
                    strategy = %result.name,
                    buffer_size,
                    cost_ms = result.cost_millis(),
                    "strategy timed"
                );
                results.push(result);
            }
        }
        Ok(results)
    }

    /// Average cost of `times` runs; setup and teardown are not timed.
    fn time_strategy(&mut self, index: usize, path: &Path, buffer: &mut [u8]) -> Result<u64> {
        let mut total: u128 = 0;
        let mut runs: u32 = 0;

        while !self.is_cancelled() && runs < self.config.times {
            runs += 1;
            let strategy = &mut self.strategies[index];
            strategy.setup(path, buffer.len())?;
            let started = Instant::now();
            let outcome = strategy.run(buffer);
            total += started.elapsed().as_nanos();
            strategy.teardown();
            outcome?;
        }

        if runs == 0 {
            return Ok(0);
        }
        Ok(u64::try_from(total / u128::from(runs)).unwrap_or(u64::MAX))
    }
}
