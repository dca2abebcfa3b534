//! Parallel container compression.
//!
//! The input is cut into `block_size` pieces.  Each piece is compressed on
//! its own, then appended to the sink at the next free offset while holding
//! the append cursor, so blocks land in completion order rather than input
//! order.  The index written after the last block restores the logical order.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::index::{encode_index, ContainerHeader, IndexEntry, HEADER_SIZE};
use super::provider::{BlockSink, BlockSource, MemorySink};
use super::{ContainerError, ContainerOptions, ContainerSummary, FailFlag};
use crate::block::compress_block_level;
use crate::io::prefs::display_level;
use crate::threadpool::WorkerPool;

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

// ---------------------------------------------------------------------------
// Shared job state
// ---------------------------------------------------------------------------

struct CompressJob<S: ?Sized, W: ?Sized> {
    source: Arc<S>,
    sink: Arc<W>,
    block_size: usize,
    level: u32,
    /// Next free byte in the sink.  Held across the write so two blocks can
    /// never be given overlapping regions.
    cursor: Mutex<u64>,
    entries: Mutex<Vec<IndexEntry>>,
    fail: FailFlag,
}

impl<S, W> CompressJob<S, W>
where
    S: BlockSource + ?Sized,
    W: BlockSink + ?Sized,
{
    fn run_block(&self, order: u32) {
        if self.fail.is_set() {
            return;
        }
        if let Err(e) = self.compress_one(order) {
            display_level(4, &format!("block {}: {}\n", order, e));
            self.fail.set(e);
        }
    }

    fn compress_one(&self, order: u32) -> Result<(), ContainerError> {
        let start = order as u64 * self.block_size as u64;
        let len = (self.source.size() - start).min(self.block_size as u64) as usize;
        let raw = self.source.read_exact_at(start, len)?;

        let block = compress_block_level(&raw, self.level)
            .map_err(|source| ContainerError::Compress { order, source })?;

        let location = {
            let mut cursor = lock(&self.cursor);
            let location = *cursor;
            self.sink.write_at(location, &block)?;
            *cursor += block.len() as u64;
            location
        };

        display_level(
            4,
            &format!(
                "block {}: {} -> {} bytes at offset {}\n",
                order,
                len,
                block.len(),
                location
            ),
        );

        lock(&self.entries).push(IndexEntry {
            order,
            location,
            compressed_size: block.len() as u32,
            uncompressed_size: len as u32,
        });
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Public entry points
// ---------------------------------------------------------------------------

/// Compresses everything in `source` into a container written to `sink`.
///
/// On error the sink holds a partial container; the caller decides whether
/// to discard it.
pub fn compress_container<S, W>(
    source: Arc<S>,
    sink: Arc<W>,
    opts: &ContainerOptions,
) -> Result<ContainerSummary, ContainerError>
where
    S: BlockSource + ?Sized + 'static,
    W: BlockSink + ?Sized + 'static,
{
    opts.validate()?;

    let input_size = source.size();
    let nb_blocks = input_size.div_ceil(opts.block_size as u64);
    if nb_blocks > u32::MAX as u64 {
        return Err(ContainerError::TooManyBlocks(nb_blocks));
    }
    let nb_blocks = nb_blocks as u32;

    // Reserve the header; it is rewritten once the index location is known.
    sink.write_at(0, &[0u8; HEADER_SIZE])?;

    let job = CompressJob {
        source,
        sink: Arc::clone(&sink),
        block_size: opts.block_size,
        level: opts.level,
        cursor: Mutex::new(HEADER_SIZE as u64),
        entries: Mutex::new(Vec::with_capacity(nb_blocks as usize)),
        fail: FailFlag::default(),
    };

    let pool = if nb_blocks > 1 && opts.nb_workers > 1 {
        let nb_threads = opts.nb_workers.min(nb_blocks as usize);
        let pool = WorkerPool::new(nb_threads, opts.nb_workers);
        if pool.is_none() {
            display_level(2, "Warning : cannot start worker threads, compressing on one thread\n");
        }
        pool
    } else {
        None
    };

    let blocks = (0..nb_blocks).take_while(|_| !job.fail.is_set());
    match pool {
        Some(pool) => {
            display_level(3, &format!("Using {} threads for compression\n", pool.nb_threads()));
            pool.for_each(blocks, |order| job.run_block(order));
        }
        None => blocks.for_each(|order| job.run_block(order)),
    }

    if let Some(e) = job.fail.take() {
        return Err(e);
    }

    let mut entries = std::mem::take(&mut *lock(&job.entries));
    entries.sort_unstable_by_key(|e| e.order);
    debug_assert_eq!(entries.len(), nb_blocks as usize);

    let index_location = *lock(&job.cursor);
    let index = encode_index(&entries);
    sink.write_at(index_location, &index)?;

    let header = ContainerHeader {
        index_location,
        index_count: nb_blocks,
    };
    sink.write_at(0, &header.to_bytes())?;

    let summary = ContainerSummary {
        blocks: nb_blocks as usize,
        uncompressed_bytes: input_size,
        compressed_bytes: index_location + index.len() as u64,
    };
    display_level(
        3,
        &format!(
            "Compressed {} bytes into {} bytes ({} blocks)\n",
            summary.uncompressed_bytes, summary.compressed_bytes, summary.blocks
        ),
    );
    Ok(summary)
}

/// Compresses an in-memory buffer into a container.
pub fn compress_buffer(src: &[u8], opts: &ContainerOptions) -> Result<Vec<u8>, ContainerError> {
    let source = Arc::new(src.to_vec());
    let sink = Arc::new(MemorySink::with_capacity(src.len() / 2 + HEADER_SIZE));
    compress_container(source, Arc::clone(&sink), opts)?;
    Ok(match Arc::try_unwrap(sink) {
        Ok(sink) => sink.into_inner(),
        Err(shared) => shared.to_vec(),
    })
}
