//! Benchmark target files.

use crate::error::{IoError, Result};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Sets the length of the file at `path` to `size` bytes, creating it if
/// needed.
///
/// Growing a file this way leaves a sparse, zero-filled region, which is
/// all a throughput benchmark needs.
///
/// # Errors
///
/// Returns an error if the file cannot be opened for writing or resized.
pub fn ensure_file<P: AsRef<Path>>(path: P, size: u64) -> Result<()> {
    let path_ref = path.as_ref();
    let write_failed = |e: std::io::Error| IoError::WriteFailed {
        path: path_ref.to_string_lossy().to_string(),
        reason: e.to_string(),
    };

    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(path_ref)
        .map_err(write_failed)?;
    file.set_len(size).map_err(write_failed)?;
    Ok(())
}

/// The file a benchmark sweep reads from.
#[derive(Debug)]
pub enum BenchFile {
    /// Temporary file removed when dropped.
    Temp(NamedTempFile),
    /// Caller-provided file, left untouched.
    Existing(PathBuf),
}

impl BenchFile {
    /// Creates a temporary file of `size` bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary file cannot be created or sized.
    pub fn temporary(size: u64) -> Result<Self> {
        let temp = tempfile::Builder::new()
            .prefix("IOTEST")
            .suffix(".testfile")
            .tempfile()
            .map_err(|e| IoError::WriteFailed {
                path: std::env::temp_dir().to_string_lossy().to_string(),
                reason: e.to_string(),
            })?;
        ensure_file(temp.path(), size)?;
        Ok(Self::Temp(temp))
    }

    /// Uses an existing file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be inspected.
    pub fn existing<P: Into<PathBuf>>(path: P) -> Result<Self> {
        let path = path.into();
        std::fs::metadata(&path).map_err(|e| IoError::OpenFailed {
            path: path.to_string_lossy().to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self::Existing(path))
    }

    /// Path of the file.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Temp(temp) => temp.path(),
            Self::Existing(path) => path,
        }
    }

    /// Current size of the file in bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the file metadata cannot be read.
    pub fn size(&self) -> Result<u64> {
        let meta = std::fs::metadata(self.path()).map_err(|e| IoError::ReadFailed {
            path: self.path().to_string_lossy().to_string(),
            reason: e.to_string(),
        })?;
        Ok(meta.len())
    }
}
