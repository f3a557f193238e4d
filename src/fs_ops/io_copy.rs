//! Streaming copy between arbitrary readers and writers.
//!
//! - Buffered I/O with large (1 MiB) chunks to reduce syscall count.
//! - A stop predicate is polled between chunks so an interrupt ends the copy
//!   promptly; the caller decides what happens to a partial destination.
//! - Returns a `CopyResult` for instrumentation.
//!
//! Snapshot semantics: the reader is consumed once until EOF; whatever the
//! source produces after EOF is not included.

use anyhow::{Context, Result};
use std::io::{self, Read, Write};

use crate::errors::IncubatorError;

/// Chunk size used for each read.
pub const BUF_SIZE: usize = 1024 * 1024;

/// Result of a streaming copy operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyResult {
    /// Total bytes copied from reader to writer.
    pub bytes: u64,
    /// Number of non-empty chunks read.
    pub chunks: u64,
}

/// Copy `reader` -> `writer` in `BUF_SIZE` chunks, then flush the writer.
///
/// Fails with [`IncubatorError::Interrupted`] as soon as `should_stop`
/// returns true (checked before every read).
pub fn copy_stream<R, W, S>(reader: &mut R, writer: &mut W, should_stop: S) -> Result<CopyResult>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
    S: Fn() -> bool,
{
    let mut buf = vec![0u8; BUF_SIZE];
    let mut res = CopyResult { bytes: 0, chunks: 0 };

    loop {
        if should_stop() {
            return Err(IncubatorError::Interrupted.into());
        }
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e).context("read input"),
        };
        writer.write_all(&buf[..n]).context("write output")?;
        res.bytes += n as u64;
        res.chunks += 1;
    }

    writer.flush().context("flush output")?;
    Ok(res)
}
