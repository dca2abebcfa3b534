//! Parallel container decompression.
//!
//! The output position of every block is known before any decoding starts
//! (the sum of the uncompressed sizes of all blocks before it in `order`),
//! so workers write straight to their own region and no ordering barrier is
//! needed.

use std::sync::Arc;

use super::index::{decode_index, ContainerHeader, IndexEntry, HEADER_SIZE};
use super::provider::{BlockSink, BlockSource, MemorySink};
use super::{ContainerError, ContainerOptions, ContainerSummary, FailFlag};
use crate::block::decompress_block_sized;
use crate::io::prefs::display_level;
use crate::threadpool::WorkerPool;

/// Reads and validates the header and index of a container.
///
/// Entries come back sorted by `order`.  Every region they name is known to
/// lie inside `source`, and no two share an `order`.
pub fn read_index<S: BlockSource + ?Sized>(source: &S) -> Result<Vec<IndexEntry>, ContainerError> {
    let file_size = source.size();
    if file_size < HEADER_SIZE as u64 {
        return Err(ContainerError::IndexOutOfBounds {
            offset: 0,
            len: HEADER_SIZE as u64,
            file_size,
        });
    }

    let raw = source.read_exact_at(0, HEADER_SIZE)?;
    let mut header_bytes = [0u8; HEADER_SIZE];
    header_bytes.copy_from_slice(&raw);
    let header = ContainerHeader::from_bytes(&header_bytes);
    header.validate(file_size)?;

    let index = source.read_exact_at(header.index_location, header.index_len() as usize)?;
    decode_index(&index, file_size)
}

// ---------------------------------------------------------------------------
// Shared job state
// ---------------------------------------------------------------------------

struct DecompressJob<S: ?Sized, W: ?Sized> {
    source: Arc<S>,
    sink: Arc<W>,
    fail: FailFlag,
}

impl<S, W> DecompressJob<S, W>
where
    S: BlockSource + ?Sized,
    W: BlockSink + ?Sized,
{
    fn run_block(&self, entry: IndexEntry, out_offset: u64) {
        if self.fail.is_set() {
            return;
        }
        if let Err(e) = self.decompress_one(entry, out_offset) {
            display_level(4, &format!("block {}: {}\n", entry.order, e));
            self.fail.set(e);
        }
    }

    fn decompress_one(&self, entry: IndexEntry, out_offset: u64) -> Result<(), ContainerError> {
        let order = entry.order;
        let block = self
            .source
            .read_exact_at(entry.location, entry.compressed_size as usize)?;
        let raw = decompress_block_sized(&block, entry.uncompressed_size as usize)
            .map_err(|source| ContainerError::Decompress { order, source })?;
        self.sink.write_at(out_offset, &raw)?;
        display_level(
            4,
            &format!(
                "block {}: {} -> {} bytes at offset {}\n",
                order,
                entry.compressed_size,
                raw.len(),
                out_offset
            ),
        );
        Ok(())
    }
}

/// Decodes the container in `source` and writes the original bytes to `sink`.
///
/// Only `opts.nb_workers` is consulted; the block size comes from the index.
pub fn decompress_container<S, W>(
    source: Arc<S>,
    sink: Arc<W>,
    opts: &ContainerOptions,
) -> Result<ContainerSummary, ContainerError>
where
    S: BlockSource + ?Sized + 'static,
    W: BlockSink + ?Sized + 'static,
{
    let entries = read_index(&*source)?;
    let compressed_bytes = source.size();

    let mut placed = Vec::with_capacity(entries.len());
    let mut out_offset = 0u64;
    for entry in entries {
        placed.push((entry, out_offset));
        out_offset += entry.uncompressed_size as u64;
    }
    let uncompressed_bytes = out_offset;
    let nb_blocks = placed.len();

    let job = DecompressJob {
        source,
        sink,
        fail: FailFlag::default(),
    };

    let pool = if nb_blocks > 1 && opts.nb_workers > 1 {
        let pool = WorkerPool::new(opts.nb_workers.min(nb_blocks), opts.nb_workers);
        if pool.is_none() {
            display_level(2, "Warning : cannot start worker threads, decoding on one thread\n");
        }
        pool
    } else {
        None
    };

    let blocks = placed.into_iter().take_while(|_| !job.fail.is_set());
    match pool {
        Some(pool) => {
            display_level(3, &format!("Using {} threads for decompression\n", pool.nb_threads()));
            pool.for_each(blocks, |(entry, offset)| job.run_block(entry, offset));
        }
        None => blocks.for_each(|(entry, offset)| job.run_block(entry, offset)),
    }

    if let Some(e) = job.fail.take() {
        return Err(e);
    }

    display_level(
        3,
        &format!(
            "Decoded {} blocks into {} bytes\n",
            nb_blocks, uncompressed_bytes
        ),
    );
    Ok(ContainerSummary {
        blocks: nb_blocks,
        uncompressed_bytes,
        compressed_bytes,
    })
}

/// Decodes an in-memory container.
pub fn decompress_buffer(src: &[u8], opts: &ContainerOptions) -> Result<Vec<u8>, ContainerError> {
    let source = Arc::new(src.to_vec());
    let sink = Arc::new(MemorySink::new());
    decompress_container(source, Arc::clone(&sink), opts)?;
    Ok(match Arc::try_unwrap(sink) {
        Ok(sink) => sink.into_inner(),
        Err(shared) => shared.to_vec(),
    })
}
