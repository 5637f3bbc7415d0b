//! Read sessions.
//!
//! A [`ReadSession`] owns one file and one fixed-size buffer and drains the
//! file sequentially in buffer-sized chunks. Sessions are handed to foreign
//! callers through the [`registry`], which issues opaque integer handles.
//!
//! A session whose file failed to open is still a valid session: runs on it
//! perform zero reads, which is indistinguishable at the boundary from an
//! empty file. The failure reason is kept in [`FileSource::Unavailable`]
//! and logged.

pub mod registry;

pub use registry::{SessionHandle, SessionRegistry, global};

use crate::error::{Result, SessionError};
use crate::io::read_chunk;
use serde::Serialize;
use std::fs::File;
use std::io::Seek;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// State of the file behind a session.
#[derive(Debug)]
pub enum FileSource {
    /// File opened successfully.
    Open(File),
    /// Opening failed; runs perform zero reads.
    Unavailable {
        /// OS error message from the failed open.
        reason: String,
    },
    /// Descriptor released through [`ReadSession::close`].
    Closed,
}

impl FileSource {
    /// Returns `true` if a file descriptor is held.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self, Self::Open(_))
    }
}

/// Why a drain loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// A fill returned zero bytes.
    EndOfFile,
    /// A fill returned fewer bytes than the buffer holds.
    ShortRead,
    /// The OS reported an error.
    ReadError,
    /// No open file (failed open or closed session).
    NoFile,
}

/// Outcome of one [`ReadSession::run`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunStats {
    /// Buffer size used for every fill.
    pub buffer_size: usize,
    /// Fills that returned at least one byte.
    pub reads: u64,
    /// Fills that returned a whole buffer.
    pub full_chunks: u64,
    /// Bytes delivered by a trailing short fill, if any.
    pub tail_bytes: usize,
    /// Total bytes consumed.
    pub bytes: u64,
    /// Why the loop stopped.
    pub stop: StopReason,
    /// Wall-clock duration of the loop in nanoseconds.
    pub elapsed_nanos: u64,
}

impl RunStats {
    const fn empty(buffer_size: usize, stop: StopReason) -> Self {
        Self {
            buffer_size,
            reads: 0,
            full_chunks: 0,
            tail_bytes: 0,
            bytes: 0,
            stop,
            elapsed_nanos: 0,
        }
    }

    /// Throughput in MiB/s, or `None` when nothing was timed.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn throughput_mib_per_sec(&self) -> Option<f64> {
        if self.elapsed_nanos == 0 {
            return None;
        }
        let secs = self.elapsed_nanos as f64 / 1e9;
        Some(self.bytes as f64 / (1024.0 * 1024.0) / secs)
    }
}

/// An open file paired with a fixed-size read buffer.
///
/// # Examples
///
/// ```
/// use readbench::session::{ReadSession, StopReason};
///
/// let dir = tempfile::tempdir().unwrap();
/// let path = dir.path().join("ten.bin");
/// std::fs::write(&path, b"0123456789").unwrap();
///
/// let mut session = ReadSession::open(&path, 4).unwrap();
/// let stats = session.run();
/// assert_eq!(stats.reads, 3);
/// assert_eq!(stats.tail_bytes, 2);
/// assert_eq!(stats.stop, StopReason::ShortRead);
/// ```
#[derive(Debug)]
pub struct ReadSession {
    path: PathBuf,
    source: FileSource,
    buffer: Box<[u8]>,
}

impl ReadSession {
    /// Opens `path` for reading and allocates a buffer of `buffer_size`
    /// bytes.
    ///
    /// A failed open does not fail the call; see [`FileSource::Unavailable`].
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidBufferSize`] if `buffer_size` is zero.
    pub fn open<P: AsRef<Path>>(path: P, buffer_size: usize) -> Result<Self> {
        if buffer_size == 0 {
            return Err(SessionError::InvalidBufferSize { size: 0 }.into());
        }
        let path = path.as_ref().to_path_buf();

        let source = match File::open(&path) {
            Ok(file) => FileSource::Open(file),
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "open failed; session will read nothing"
                );
                FileSource::Unavailable {
                    reason: e.to_string(),
                }
            }
        };

        Ok(Self {
            path,
            source,
            buffer: vec![0u8; buffer_size].into_boxed_slice(),
        })
    }

    /// Drains the file in buffer-sized fills.
    ///
    /// Stops at the first fill that returns fewer bytes than the buffer
    /// holds. The file position is not rewound, so a second run on a
    /// drained file performs zero reads.
    pub fn run(&mut self) -> RunStats {
        let buffer_size = self.buffer.len();
        let FileSource::Open(file) = &mut self.source else {
            return RunStats::empty(buffer_size, StopReason::NoFile);
        };

        let mut stats = RunStats::empty(buffer_size, StopReason::EndOfFile);
        let started = Instant::now();
        loop {
            match read_chunk(file, &mut self.buffer) {
                Ok(0) => break,
                Ok(n) if n == buffer_size => {
                    stats.reads += 1;
                    stats.full_chunks += 1;
                    stats.bytes += n as u64;
                }
                Ok(n) => {
                    stats.reads += 1;
                    stats.tail_bytes = n;
                    stats.bytes += n as u64;
                    stats.stop = StopReason::ShortRead;
                    break;
                }
                Err(e) => {
                    tracing::debug!(path = %self.path.display(), error = %e, "read failed");
                    stats.stop = StopReason::ReadError;
                    break;
                }
            }
        }
        stats.elapsed_nanos = u64::try_from(started.elapsed().as_nanos()).unwrap_or(u64::MAX);

        tracing::debug!(
            path = %self.path.display(),
            buffer_size,
            reads = stats.reads,
            bytes = stats.bytes,
            stop = ?stats.stop,
            "session run finished"
        );
        stats
    }

    /// Releases the file descriptor, keeping the buffer.
    ///
    /// Later runs perform zero reads. Closing twice is a no-op.
    pub fn close(&mut self) {
        if self.source.is_open() {
            tracing::debug!(path = %self.path.display(), "closing session file");
            self.source = FileSource::Closed;
        }
    }

    /// Size of the read buffer in bytes.
    #[must_use]
    pub fn buffer_size(&self) -> usize {
        self.buffer.len()
    }

    /// Path the session was created with.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// State of the underlying file.
    #[must_use]
    pub const fn source(&self) -> &FileSource {
        &self.source
    }

    /// Current read position, or `None` if no file is open.
    pub fn position(&mut self) -> Option<u64> {
        match &mut self.source {
            FileSource::Open(file) => file.stream_position().ok(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use test_case::test_case;

    fn write_file(dir: &TempDir, name: &str, len: usize) -> PathBuf {
        let path = dir.path().join(name);
        let content: Vec<u8> = (0..=255u8).cycle().take(len).collect();
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_ten_bytes_buffer_four() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_file(&temp_dir, "ten.bin", 10);

        let mut session = ReadSession::open(&path, 4).unwrap();
        let stats = session.run();

        assert_eq!(stats.reads, 3);
        assert_eq!(stats.full_chunks, 2);
        assert_eq!(stats.tail_bytes, 2);
        assert_eq!(stats.bytes, 10);
        assert_eq!(stats.stop, StopReason::ShortRead);
        assert_eq!(session.position(), Some(10));
    }

    #[test_case(0, 4, 0, StopReason::EndOfFile; "empty file")]
    #[test_case(8, 4, 2, StopReason::EndOfFile; "exact multiple")]
    #[test_case(3, 4, 1, StopReason::ShortRead; "smaller than buffer")]
    #[test_case(4096, 1, 4096, StopReason::EndOfFile; "single byte buffer")]
    #[test_case(4097, 1024, 5, StopReason::ShortRead; "one byte over")]
    fn test_drain(len: usize, buffer_size: usize, reads: u64, stop: StopReason) {
        let temp_dir = TempDir::new().unwrap();
        let path = write_file(&temp_dir, "data.bin", len);

        let mut session = ReadSession::open(&path, buffer_size).unwrap();
        let stats = session.run();

        assert_eq!(stats.reads, reads);
        assert_eq!(stats.bytes, len as u64);
        assert_eq!(stats.stop, stop);
        assert_eq!(session.position(), Some(len as u64));
    }

    #[test]
    fn test_rerun_after_drain_reads_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_file(&temp_dir, "twice.bin", 100);

        let mut session = ReadSession::open(&path, 32).unwrap();
        assert_eq!(session.run().bytes, 100);

        let second = session.run();
        assert_eq!(second.reads, 0);
        assert_eq!(second.bytes, 0);
        assert_eq!(second.stop, StopReason::EndOfFile);
    }

    #[test]
    fn test_missing_file_is_unavailable() {
        let mut session = ReadSession::open("/nonexistent/path/file.bin", 64).unwrap();
        assert!(matches!(
            session.source(),
            FileSource::Unavailable { .. }
        ));

        let stats = session.run();
        assert_eq!(stats.reads, 0);
        assert_eq!(stats.stop, StopReason::NoFile);
        assert_eq!(session.position(), None);
    }

    #[test]
    fn test_zero_buffer_size_rejected() {
        let result = ReadSession::open("/tmp/anything", 0);
        assert!(matches!(
            result,
            Err(crate::Error::Session(SessionError::InvalidBufferSize {
                size: 0
            }))
        ));
    }

    #[test]
    fn test_close_stops_reading() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_file(&temp_dir, "closed.bin", 64);

        let mut session = ReadSession::open(&path, 16).unwrap();
        assert!(session.source().is_open());
        session.close();
        session.close();
        assert!(matches!(session.source(), FileSource::Closed));

        let stats = session.run();
        assert_eq!(stats.reads, 0);
        assert_eq!(stats.stop, StopReason::NoFile);
        assert_eq!(session.buffer_size(), 16);
    }

    #[test]
    fn test_throughput() {
        let mut stats = RunStats::empty(4, StopReason::EndOfFile);
        assert!(stats.throughput_mib_per_sec().is_none());

        stats.bytes = 1024 * 1024;
        stats.elapsed_nanos = 500_000_000;
        let mib_s = stats.throughput_mib_per_sec().unwrap();
        assert!((mib_s - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_directory_read_error() {
        // Opening a directory succeeds on Unix but reading it fails
        let temp_dir = TempDir::new().unwrap();
        let mut session = ReadSession::open(temp_dir.path(), 16).unwrap();
        if session.source().is_open() {
            let stats = session.run();
            assert_eq!(stats.reads, 0);
            assert_eq!(stats.stop, StopReason::ReadError);
        }
    }
}
