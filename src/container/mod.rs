//! Block-parallel container.
//!
//! ```text
//! [header: index_location u64 LE, index_count u32 LE]            12 bytes
//! [block …] [block …] …                                           any physical order
//! [index: index_count × {order u32, location u64,
//!                        compressed_size u24, uncompressed_size u24}]  18 bytes each
//! ```
//!
//! Every block is a complete single-block stream (see [`crate::block`]).
//! The index, sorted by `order`, is the only thing that defines the logical
//! order of the data; physical placement is whatever the workers happened to
//! produce.
//!
//! Neither direction touches the filesystem directly.  Bytes come from a
//! [`BlockSource`] and go to a [`BlockSink`]; file handling, including removal
//! of partial output on failure, belongs to [`crate::io`].

pub mod compress;
pub mod decompress;
pub mod index;
pub mod provider;

use std::fmt;
use std::io;
use std::sync::{Mutex, PoisonError};

use crate::block::{
    compress_bound, CompressError, DecompressError, LEVEL_DEFAULT, LEVEL_MAX, LEVEL_MIN,
};
use crate::config::BLOCK_SIZE_DEFAULT;
use crate::util::default_nb_workers;

pub use compress::{compress_buffer, compress_container};
pub use decompress::{decompress_buffer, decompress_container, read_index};
pub use index::{ContainerHeader, IndexEntry, HEADER_SIZE, INDEX_ENTRY_SIZE};
pub use provider::{BlockSink, BlockSource, LockedStream, MemorySink};

/// Largest value the 3-byte size fields of an index entry can hold.
pub const MAX_SIZE_FIELD: usize = (1 << 24) - 1;

/// Largest block size whose worst-case compressed size still fits the
/// 3-byte `compressed_size` field.
pub const MAX_CONTAINER_BLOCK_SIZE: usize = 16_000_000;

// ─────────────────────────────────────────────────────────────────────────────
// Error type
// ─────────────────────────────────────────────────────────────────────────────

/// Errors returned by container compression and decompression.
///
/// Any single block failing aborts the whole operation.
#[derive(Debug)]
pub enum ContainerError {
    /// Block `order` could not be compressed.
    Compress { order: u32, source: CompressError },
    /// Block `order` is malformed.
    Decompress { order: u32, source: DecompressError },
    /// A region named by the header or index lies outside the file.
    IndexOutOfBounds { offset: u64, len: u64, file_size: u64 },
    /// Two index entries claim the same `order`.
    DuplicateBlock { order: u32 },
    /// The configured block size is zero or too large for the index fields.
    InvalidBlockSize(usize),
    /// The input would need more blocks than a `u32` order can number.
    TooManyBlocks(u64),
    /// The underlying stream failed.
    Io(io::Error),
}

impl fmt::Display for ContainerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerError::Compress { order, source } => {
                write!(f, "block {}: compression failed: {}", order, source)
            }
            ContainerError::Decompress { order, source } => {
                write!(f, "block {}: decompression failed: {}", order, source)
            }
            ContainerError::IndexOutOfBounds { offset, len, file_size } => write!(
                f,
                "region of {} bytes at offset {} exceeds file size {}",
                len, offset, file_size
            ),
            ContainerError::DuplicateBlock { order } => {
                write!(f, "index lists block {} more than once", order)
            }
            ContainerError::InvalidBlockSize(size) => write!(
                f,
                "invalid block size {} (must be 1..={})",
                size, MAX_CONTAINER_BLOCK_SIZE
            ),
            ContainerError::TooManyBlocks(n) => write!(f, "input needs {} blocks", n),
            ContainerError::Io(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ContainerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ContainerError::Compress { source, .. } => Some(source),
            ContainerError::Decompress { source, .. } => Some(source),
            ContainerError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ContainerError {
    fn from(e: io::Error) -> Self {
        ContainerError::Io(e)
    }
}

impl From<ContainerError> for io::Error {
    fn from(e: ContainerError) -> Self {
        match e {
            ContainerError::Io(e) => e,
            ContainerError::InvalidBlockSize(_) | ContainerError::TooManyBlocks(_) => {
                io::Error::new(io::ErrorKind::InvalidInput, e)
            }
            other => io::Error::new(io::ErrorKind::InvalidData, other),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Options and summary
// ─────────────────────────────────────────────────────────────────────────────

/// Knobs for one container operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerOptions {
    /// Uncompressed bytes per block (compression only).
    pub block_size: usize,
    /// Worker threads.  `1` runs everything on the calling thread.
    pub nb_workers: usize,
    /// Match-search level (compression only).  The container layout does not
    /// depend on it.
    pub level: u32,
}

impl Default for ContainerOptions {
    fn default() -> Self {
        ContainerOptions::new(BLOCK_SIZE_DEFAULT, default_nb_workers())
    }
}

impl ContainerOptions {
    /// Options at [`LEVEL_DEFAULT`].
    pub fn new(block_size: usize, nb_workers: usize) -> Self {
        ContainerOptions {
            block_size,
            nb_workers,
            level: LEVEL_DEFAULT,
        }
    }

    /// Same options with `level` clamped to `LEVEL_MIN..=LEVEL_MAX`.
    pub fn with_level(self, level: u32) -> Self {
        ContainerOptions {
            level: level.clamp(LEVEL_MIN, LEVEL_MAX),
            ..self
        }
    }

    pub fn validate(&self) -> Result<(), ContainerError> {
        if self.block_size == 0 || self.block_size > MAX_CONTAINER_BLOCK_SIZE {
            return Err(ContainerError::InvalidBlockSize(self.block_size));
        }
        debug_assert!(compress_bound(self.block_size) <= MAX_SIZE_FIELD);
        Ok(())
    }
}

/// What a finished container operation processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContainerSummary {
    pub blocks: usize,
    pub uncompressed_bytes: u64,
    /// Total container size, header and index included.
    pub compressed_bytes: u64,
}

// ─────────────────────────────────────────────────────────────────────────────
// Shared failure flag
// ─────────────────────────────────────────────────────────────────────────────

/// First error raised by any worker.  Workers check it before starting a
/// block and skip the work once it is set; nothing already running is
/// cancelled.
#[derive(Default)]
pub(crate) struct FailFlag {
    first: Mutex<Option<ContainerError>>,
}

impl FailFlag {
    pub(crate) fn is_set(&self) -> bool {
        self.first
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Records `err` unless an earlier error is already stored.
    pub(crate) fn set(&self, err: ContainerError) {
        let mut first = self.first.lock().unwrap_or_else(PoisonError::into_inner);
        if first.is_none() {
            *first = Some(err);
        }
    }

    pub(crate) fn take(&self) -> Option<ContainerError> {
        self.first
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}
