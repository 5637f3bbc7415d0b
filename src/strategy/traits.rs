//! Read strategy trait definition.

use crate::error::Result;
use std::path::Path;

/// A way of reading a file sequentially from start to end.
///
/// The harness calls [`setup`](Self::setup), times a single
/// [`run`](Self::run), then calls [`teardown`](Self::teardown). Only `run`
/// is measured, so opening files and mapping memory belong in `setup`.
///
/// # Examples
///
/// ```
/// use readbench::strategy::{DirectRead, ReadStrategy};
///
/// let dir = tempfile::tempdir().unwrap();
/// let path = dir.path().join("data.bin");
/// std::fs::write(&path, vec![0u8; 300]).unwrap();
///
/// let mut strategy = DirectRead::new();
/// let mut buffer = vec![0u8; 128];
/// strategy.setup(&path, buffer.len()).unwrap();
/// assert_eq!(strategy.run(&mut buffer).unwrap(), 300);
/// strategy.teardown();
/// ```
pub trait ReadStrategy: Send {
    /// Returns the name of the strategy.
    fn name(&self) -> &'static str;

    /// Returns a description of the strategy.
    fn description(&self) -> &'static str {
        "No description available"
    }

    /// Opens whatever the strategy reads from.
    ///
    /// `buffer_size` is the size of the buffer later passed to `run`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or mapped.
    fn setup(&mut self, path: &Path, buffer_size: usize) -> Result<()>;

    /// Reads the file to the end, returning the number of bytes consumed.
    ///
    /// # Errors
    ///
    /// Returns an error if called before `setup` or if a read fails.
    fn run(&mut self, buffer: &mut [u8]) -> Result<u64>;

    /// Releases resources acquired in `setup`.
    fn teardown(&mut self);
}
