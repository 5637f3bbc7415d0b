//! Unbuffered reads straight from a `File`.

use super::traits::ReadStrategy;
use crate::error::{BenchError, IoError, Result};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Calls `read` on `reader` until it returns zero, counting bytes.
///
/// Unlike [`read_chunk`](crate::io::read_chunk) a short read does not end
/// the loop; only a zero-length read does.
pub(crate) fn drain<R: Read + ?Sized>(reader: &mut R, buffer: &mut [u8], path: &str) -> Result<u64> {
    let mut total = 0u64;
    loop {
        match reader.read(buffer) {
            Ok(0) => return Ok(total),
            Ok(n) => total += n as u64,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => {
                return Err(IoError::ReadFailed {
                    path: path.to_string(),
                    reason: e.to_string(),
                }
                .into());
            }
        }
    }
}

pub(crate) fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| {
        IoError::OpenFailed {
            path: path.to_string_lossy().to_string(),
            reason: e.to_string(),
        }
        .into()
    })
}

/// Plain `File::read` loop.
#[derive(Debug, Default)]
pub struct DirectRead {
    file: Option<(File, String)>,
}

impl DirectRead {
    /// Creates the strategy.
    #[must_use]
    pub const fn new() -> Self {
        Self { file: None }
    }
}

impl ReadStrategy for DirectRead {
    fn name(&self) -> &'static str {
        "file"
    }

    fn description(&self) -> &'static str {
        "Unbuffered File::read into the caller's buffer"
    }

    fn setup(&mut self, path: &Path, _buffer_size: usize) -> Result<()> {
        let file = open(path)?;
        self.file = Some((file, path.to_string_lossy().to_string()));
        Ok(())
    }

    fn run(&mut self, buffer: &mut [u8]) -> Result<u64> {
        let (file, path) = self
            .file
            .as_mut()
            .ok_or(BenchError::NotPrepared { name: "file" })?;
        drain(file, buffer, path)
    }

    fn teardown(&mut self) {
        self.file = None;
    }
}
