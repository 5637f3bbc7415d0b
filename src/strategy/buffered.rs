//! Reads through a `BufReader`.

use super::direct::{drain, open};
use super::traits::ReadStrategy;
use crate::error::{BenchError, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Capacity of the intermediate buffer, matching `BufferedInputStream`.
pub const BUFFERED_CAPACITY: usize = 8 * 1024;

/// `BufReader<File>` read loop.
#[derive(Debug, Default)]
pub struct BufferedRead {
    reader: Option<(BufReader<File>, String)>,
}

impl BufferedRead {
    /// Creates the strategy.
    #[must_use]
    pub const fn new() -> Self {
        Self { reader: None }
    }
}

impl ReadStrategy for BufferedRead {
    fn name(&self) -> &'static str {
        "buffered"
    }

    fn description(&self) -> &'static str {
        "File wrapped in an 8 KiB BufReader"
    }

    fn setup(&mut self, path: &Path, _buffer_size: usize) -> Result<()> {
        let reader = BufReader::with_capacity(BUFFERED_CAPACITY, open(path)?);
        self.reader = Some((reader, path.to_string_lossy().to_string()));
        Ok(())
    }

    fn run(&mut self, buffer: &mut [u8]) -> Result<u64> {
        let (reader, path) = self
            .reader
            .as_mut()
            .ok_or(BenchError::NotPrepared { name: "buffered" })?;
        drain(reader, buffer, path)
    }

    fn teardown(&mut self) {
        self.reader = None;
    }
}
