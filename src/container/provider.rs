//! Byte providers for the container.
//!
//! Container code only ever asks for "these bytes at this offset" and
//! "put these bytes at this offset".  Any seekable stream can satisfy that by
//! wrapping it in a [`LockedStream`]; the mutex makes each seek+read or
//! seek+write pair atomic with respect to the other workers.

use std::io::{self, Read, Seek, SeekFrom, Write};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Positional, thread-safe reads.
pub trait BlockSource: Send + Sync {
    /// Total size of the source in bytes.
    fn size(&self) -> u64;

    /// Returns exactly `len` bytes starting at `offset`, or an
    /// `UnexpectedEof` error if the range runs past the end.
    fn read_exact_at(&self, offset: u64, len: usize) -> io::Result<Vec<u8>>;
}

/// Positional, thread-safe writes.
pub trait BlockSink: Send + Sync {
    fn write_at(&self, offset: u64, buf: &[u8]) -> io::Result<()>;
}

fn out_of_range(offset: u64, len: usize, size: u64) -> io::Error {
    io::Error::new(
        io::ErrorKind::UnexpectedEof,
        format!("read of {} bytes at offset {} past end ({})", len, offset, size),
    )
}

// ─────────────────────────────────────────────────────────────────────────────
// LockedStream
// ─────────────────────────────────────────────────────────────────────────────

/// A seekable stream behind a mutex.
pub struct LockedStream<F> {
    inner: Mutex<F>,
    size: u64,
}

impl<F: Seek> LockedStream<F> {
    /// Wraps `inner`, recording its current length as the source size.
    pub fn new(mut inner: F) -> io::Result<Self> {
        let size = inner.seek(SeekFrom::End(0))?;
        Ok(LockedStream {
            inner: Mutex::new(inner),
            size,
        })
    }
}

impl<F> LockedStream<F> {
    pub fn into_inner(self) -> F {
        self.inner.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock(&self) -> MutexGuard<'_, F> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<F: Read + Seek + Send> BlockSource for LockedStream<F> {
    fn size(&self) -> u64 {
        self.size
    }

    fn read_exact_at(&self, offset: u64, len: usize) -> io::Result<Vec<u8>> {
        if offset.checked_add(len as u64).map_or(true, |end| end > self.size) {
            return Err(out_of_range(offset, len, self.size));
        }
        let mut buf = vec![0u8; len];
        let mut f = self.lock();
        f.seek(SeekFrom::Start(offset))?;
        f.read_exact(&mut buf)?;
        Ok(buf)
    }
}

impl<F: Write + Seek + Send> BlockSink for LockedStream<F> {
    fn write_at(&self, offset: u64, buf: &[u8]) -> io::Result<()> {
        let mut f = self.lock();
        f.seek(SeekFrom::Start(offset))?;
        f.write_all(buf)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// In-memory providers
// ─────────────────────────────────────────────────────────────────────────────

impl BlockSource for Vec<u8> {
    fn size(&self) -> u64 {
        self.len() as u64
    }

    fn read_exact_at(&self, offset: u64, len: usize) -> io::Result<Vec<u8>> {
        let start = usize::try_from(offset).map_err(|_| out_of_range(offset, len, self.size()))?;
        match start.checked_add(len) {
            Some(end) if end <= self.len() => Ok(self[start..end].to_vec()),
            _ => Err(out_of_range(offset, len, self.size())),
        }
    }
}

/// Growable in-memory sink.  Gaps left by out-of-order writes are zero-filled
/// until something writes over them.
#[derive(Default)]
pub struct MemorySink {
    buf: Mutex<Vec<u8>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        MemorySink {
            buf: Mutex::new(Vec::with_capacity(capacity)),
        }
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.buf.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of the bytes written so far.
    pub fn to_vec(&self) -> Vec<u8> {
        self.buf.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl BlockSink for MemorySink {
    fn write_at(&self, offset: u64, data: &[u8]) -> io::Result<()> {
        let start = usize::try_from(offset)
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "offset exceeds memory"))?;
        let end = start + data.len();
        let mut buf = self.buf.lock().unwrap_or_else(PoisonError::into_inner);
        if buf.len() < end {
            buf.resize(end, 0);
        }
        buf[start..end].copy_from_slice(data);
        Ok(())
    }
}
