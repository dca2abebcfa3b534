//! E2E Test Suite 02: Block-Parallel Container
//!
//! Drives compress_container / decompress_container through seekable
//! in-memory streams, the way a caller embedding the library would:
//! - round trips over several block sizes and worker counts
//! - a container written with N workers decodes with M workers
//! - listing the index without touching block payloads
//! - one damaged block fails the whole decode

use std::io::Cursor;
use std::sync::Arc;

use lz77::container::{read_index, LockedStream, MemorySink};
use lz77::{
    compress_buffer, compress_container, decompress_buffer, decompress_container, ContainerError,
    ContainerOptions,
};

fn opts(block_size: usize, nb_workers: usize) -> ContainerOptions {
    ContainerOptions::new(block_size, nb_workers)
}

fn corpus(len: usize) -> Vec<u8> {
    let words = ["alpha ", "beta ", "gamma ", "delta ", "epsilon ", "zeta\n"];
    let mut out = Vec::with_capacity(len + 8);
    let mut x = 1u32;
    while out.len() < len {
        x = x.wrapping_mul(22_695_477).wrapping_add(1);
        out.extend_from_slice(words[(x >> 28) as usize % words.len()].as_bytes());
        if x & 0x100 != 0 {
            out.push((x >> 8) as u8);
        }
    }
    out.truncate(len);
    out
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 1: stream round trip
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_stream_roundtrip() {
    let original = corpus(1_500_000);
    for &(block_size, workers) in &[(65_536, 1), (65_536, 4), (100_000, 8), (2_000_000, 3)] {
        let source = Arc::new(LockedStream::new(Cursor::new(original.clone())).unwrap());
        let sink = Arc::new(LockedStream::new(Cursor::new(Vec::new())).unwrap());
        let summary =
            compress_container(source, Arc::clone(&sink), &opts(block_size, workers)).unwrap();
        assert_eq!(summary.uncompressed_bytes, original.len() as u64);
        assert_eq!(
            summary.blocks,
            original.len().div_ceil(block_size),
            "block size {block_size}"
        );

        let packed = Arc::try_unwrap(sink).ok().unwrap().into_inner().into_inner();
        assert_eq!(packed.len() as u64, summary.compressed_bytes);
        assert!(packed.len() < original.len());

        let source = Arc::new(LockedStream::new(Cursor::new(packed)).unwrap());
        let out = Arc::new(MemorySink::new());
        let back = decompress_container(source, Arc::clone(&out), &opts(1, workers)).unwrap();
        assert_eq!(back.blocks, summary.blocks);
        assert_eq!(out.to_vec(), original);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 2: worker counts are independent on each side
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_cross_worker_counts() {
    let original = corpus(400_000);
    for writers in [1, 2, 5] {
        let packed = compress_buffer(&original, &opts(30_000, writers)).unwrap();
        for readers in [1, 3, 16] {
            assert_eq!(
                decompress_buffer(&packed, &opts(1, readers)).unwrap(),
                original,
                "writers {writers} readers {readers}"
            );
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 3: index inspection
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_index_describes_input() {
    let original = corpus(250_000);
    let packed = compress_buffer(&original, &opts(64 * 1024, 4)).unwrap();
    let index = read_index(&packed).unwrap();
    assert_eq!(index.len(), 4);

    let mut offset = 0usize;
    for (i, e) in index.iter().enumerate() {
        assert_eq!(e.order as usize, i);
        let block = &packed[e.location as usize..][..e.compressed_size as usize];
        let raw = lz77::decompress_block(block).unwrap();
        assert_eq!(raw.len(), e.uncompressed_size as usize);
        assert_eq!(&original[offset..offset + raw.len()], raw.as_slice());
        offset += raw.len();
    }
    assert_eq!(offset, original.len());
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 4: damaged block
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_damaged_block_fails_whole_decode() {
    let original = corpus(200_000);
    let mut packed = compress_buffer(&original, &opts(20_000, 1)).unwrap();
    let index = read_index(&packed).unwrap();
    let victim = index[6];
    // Claim one byte more than the block holds.
    let at = victim.location as usize;
    let claimed = victim.uncompressed_size + 1;
    packed[at..at + 3].copy_from_slice(&claimed.to_le_bytes()[..3]);

    for workers in [1, 4] {
        match decompress_buffer(&packed, &opts(1, workers)) {
            Err(ContainerError::Decompress { order, .. }) => assert_eq!(order, 6),
            other => panic!("expected a decompress error, got {:?}", other.map(|v| v.len())),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 5: empty input
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_empty_input() {
    let packed = compress_buffer(&[], &ContainerOptions::default()).unwrap();
    assert_eq!(packed.len(), 12);
    assert!(decompress_buffer(&packed, &ContainerOptions::default())
        .unwrap()
        .is_empty());
}
