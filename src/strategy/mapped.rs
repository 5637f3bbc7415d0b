//! Copies out of a read-only memory map.

use super::traits::ReadStrategy;
use crate::error::{BenchError, Result};
use crate::io::map_file;
use memmap2::Mmap;
use std::path::Path;

/// Memory-mapped strategy.
///
/// Each run walks the map from the start, copying `buffer.len()` bytes at a
/// time and a final partial copy for the remainder.
#[derive(Debug, Default)]
pub struct MappedRead {
    map: Option<Mmap>,
}

impl MappedRead {
    /// Creates the strategy.
    #[must_use]
    pub const fn new() -> Self {
        Self { map: None }
    }
}

impl ReadStrategy for MappedRead {
    fn name(&self) -> &'static str {
        "mmap"
    }

    fn description(&self) -> &'static str {
        "Read-only memory map copied chunk by chunk"
    }

    fn setup(&mut self, path: &Path, _buffer_size: usize) -> Result<()> {
        self.map = Some(map_file(path)?);
        Ok(())
    }

    fn run(&mut self, buffer: &mut [u8]) -> Result<u64> {
        let map = self
            .map
            .as_ref()
            .ok_or(BenchError::NotPrepared { name: "mmap" })?;
        if buffer.is_empty() {
            return Ok(0);
        }

        let mut copied = 0u64;
        for chunk in map.chunks(buffer.len()) {
            buffer[..chunk.len()].copy_from_slice(chunk);
            copied += chunk.len() as u64;
        }
        Ok(copied)
    }

    fn teardown(&mut self) {
        self.map = None;
    }
}
