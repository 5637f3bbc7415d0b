//! Chunked reading and memory mapping.
//!
//! [`read_chunk`] behaves like `fread` with a single item of `buf.len()`
//! bytes: it keeps asking the OS until the buffer is full or the source
//! reports end of file, so a short return always means the stream is
//! exhausted (or failed).

// Memory mapping requires unsafe but is well-documented and safe for read-only access
#![allow(unsafe_code)]

use crate::error::{IoError, Result};
use memmap2::Mmap;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Fills `buf` from `reader`, retrying partial and interrupted reads.
///
/// Returns the number of bytes placed in `buf`. The value is `buf.len()`
/// unless the reader hit end of file first.
///
/// # Errors
///
/// Returns the first non-`Interrupted` error from the reader. Bytes read
/// before the error are discarded from the count, as `fread` does.
///
/// # Examples
///
/// ```
/// use readbench::io::read_chunk;
///
/// let mut source: &[u8] = b"0123456789";
/// let mut buf = [0u8; 4];
/// assert_eq!(read_chunk(&mut source, &mut buf).unwrap(), 4);
/// assert_eq!(read_chunk(&mut source, &mut buf).unwrap(), 4);
/// assert_eq!(read_chunk(&mut source, &mut buf).unwrap(), 2);
/// assert_eq!(read_chunk(&mut source, &mut buf).unwrap(), 0);
/// ```
pub fn read_chunk<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Maps a file read-only.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or mapped.
pub fn map_file<P: AsRef<Path>>(path: P) -> Result<Mmap> {
    let path_ref = path.as_ref();
    let path_str = path_ref.to_string_lossy().to_string();

    let file = File::open(path_ref).map_err(|e| IoError::OpenFailed {
        path: path_str.clone(),
        reason: e.to_string(),
    })?;

    // Safety: the map is read-only and the benchmark never truncates the
    // file while a map is alive
    unsafe {
        Mmap::map(&file).map_err(|e| {
            IoError::MmapFailed {
                path: path_str,
                reason: e.to_string(),
            }
            .into()
        })
    }
}
