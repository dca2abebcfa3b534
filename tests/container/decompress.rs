// Tests for parallel container decompression (container/decompress.rs).
//
// Coverage:
//   - round trips across block sizes and worker counts
//   - blocks stored in any physical order decode to the same bytes
//   - read_index validation: truncated header, index out of bounds,
//     duplicate orders, blocks outside the file
//   - a corrupt block aborts the whole operation with its order

use std::sync::Arc;

use crate::common::{opts, sample};
use lz77::block::{compress_block, DecompressError};
use lz77::container::index::encode_index;
use lz77::container::{
    compress_buffer, decompress_buffer, decompress_container, read_index, ContainerError,
    ContainerHeader, IndexEntry, MemorySink, HEADER_SIZE,
};

/// Assembles a container by hand from `(order, raw bytes)` pairs, storing the
/// blocks in the order given.
fn build(blocks: &[(u32, &[u8])]) -> Vec<u8> {
    let mut out = vec![0u8; HEADER_SIZE];
    let mut entries = Vec::new();
    for &(order, raw) in blocks {
        let block = compress_block(raw).unwrap();
        entries.push(IndexEntry {
            order,
            location: out.len() as u64,
            compressed_size: block.len() as u32,
            uncompressed_size: raw.len() as u32,
        });
        out.extend_from_slice(&block);
    }
    let header = ContainerHeader {
        index_location: out.len() as u64,
        index_count: entries.len() as u32,
    };
    out.extend_from_slice(&encode_index(&entries));
    out[..HEADER_SIZE].copy_from_slice(&header.to_bytes());
    out
}

// ─────────────────────────────────────────────────────────────────────────────
// Round trips
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn round_trip_grid() {
    for &len in &[0usize, 1, 999, 1000, 1001, 65_536, 250_000] {
        let data = sample(len, len as u32 + 1);
        for &(block_size, workers) in &[(1000, 1), (1000, 4), (4096, 3), (1 << 20, 2)] {
            let packed = compress_buffer(&data, &opts(block_size, workers)).unwrap();
            let unpacked = decompress_buffer(&packed, &opts(block_size, workers)).unwrap();
            assert_eq!(unpacked, data, "len {len} block {block_size} workers {workers}");
        }
    }
}

#[test]
fn decoder_ignores_block_size_option() {
    let data = sample(30_000, 11);
    let packed = compress_buffer(&data, &opts(3_000, 2)).unwrap();
    let unpacked = decompress_buffer(&packed, &opts(77, 2)).unwrap();
    assert_eq!(unpacked, data);
}

#[test]
fn physical_order_does_not_matter() {
    let a = b"first block, first block".as_slice();
    let b = b"second".as_slice();
    let c = b"third third third".as_slice();
    let expected = [a, b, c].concat();
    for perm in [[0u32, 1, 2], [2, 0, 1], [1, 2, 0], [2, 1, 0]] {
        let parts = [a, b, c];
        let blocks: Vec<(u32, &[u8])> = perm.iter().map(|&i| (i, parts[i as usize])).collect();
        let container = build(&blocks);
        for workers in [1, 3] {
            assert_eq!(decompress_buffer(&container, &opts(1, workers)).unwrap(), expected);
        }
    }
}

#[test]
fn summary_reports_sizes() {
    let data = sample(42_000, 12);
    let packed = compress_buffer(&data, &opts(10_000, 1)).unwrap();
    let sink = Arc::new(MemorySink::new());
    let summary = decompress_container(Arc::new(packed.clone()), Arc::clone(&sink), &opts(1, 4))
        .unwrap();
    assert_eq!(summary.blocks, 5);
    assert_eq!(summary.uncompressed_bytes, 42_000);
    assert_eq!(summary.compressed_bytes, packed.len() as u64);
    assert_eq!(sink.to_vec(), data);
}

#[test]
fn empty_blocks_are_allowed() {
    let container = build(&[(0, b""), (1, b"xyz"), (2, b"")]);
    assert_eq!(decompress_buffer(&container, &opts(1, 2)).unwrap(), b"xyz");
}

// ─────────────────────────────────────────────────────────────────────────────
// read_index
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn read_index_sorted() {
    let container = build(&[(1, b"bbbb"), (0, b"aaaa")]);
    let entries = read_index(&container).unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].order, 0);
    assert!(entries[0].location > entries[1].location);
}

#[test]
fn short_file_is_out_of_bounds() {
    for len in 0..HEADER_SIZE {
        let junk = vec![0u8; len];
        assert!(matches!(
            read_index(&junk),
            Err(ContainerError::IndexOutOfBounds { offset: 0, .. })
        ));
    }
}

#[test]
fn truncated_index_is_out_of_bounds() {
    let packed = compress_buffer(&sample(5_000, 13), &opts(1_000, 1)).unwrap();
    let cut = packed[..packed.len() - 1].to_vec();
    assert!(matches!(
        decompress_buffer(&cut, &opts(1, 1)),
        Err(ContainerError::IndexOutOfBounds { .. })
    ));
}

#[test]
fn duplicate_order_is_rejected() {
    let container = build(&[(0, b"aaaa"), (0, b"bbbb")]);
    assert!(matches!(
        decompress_buffer(&container, &opts(1, 1)),
        Err(ContainerError::DuplicateBlock { order: 0 })
    ));
}

#[test]
fn entry_pointing_past_end_is_rejected() {
    let mut container = build(&[(0, b"hello hello hello")]);
    let header = ContainerHeader::from_bytes(container[..HEADER_SIZE].try_into().unwrap());
    // Move the block's location field (bytes 4..12 of the entry) far out.
    let loc = header.index_location as usize + 4;
    container[loc..loc + 8].copy_from_slice(&10_000u64.to_le_bytes());
    assert!(matches!(
        read_index(&container),
        Err(ContainerError::IndexOutOfBounds { offset: 10_000, .. })
    ));
}

// ─────────────────────────────────────────────────────────────────────────────
// Corrupt blocks
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn uncompressed_size_mismatch_names_block() {
    let mut container = build(&[(0, b"aaaaaaaa"), (1, b"bbbbbbbb")]);
    let header = ContainerHeader::from_bytes(container[..HEADER_SIZE].try_into().unwrap());
    // Second entry's uncompressed_size field.
    let field = header.index_location as usize + 18 + 15;
    container[field] = 9;
    for workers in [1, 2] {
        match decompress_buffer(&container, &opts(1, workers)) {
            Err(ContainerError::Decompress { order, source }) => {
                assert_eq!(order, 1);
                assert_eq!(source, DecompressError::SizeMismatch);
            }
            other => panic!("expected Decompress, got {:?}", other),
        }
    }
}

#[test]
fn corrupt_token_stream_is_reported() {
    let mut container = build(&[(0, b"plain literal text")]);
    // Header says 18 bytes; claim a 19-byte literal run instead of 18.
    container[HEADER_SIZE + 3] = 18;
    assert!(matches!(
        decompress_buffer(&container, &opts(1, 1)),
        Err(ContainerError::Decompress {
            order: 0,
            source: DecompressError::TruncatedToken
        })
    ));
}

#[test]
fn corruption_anywhere_never_panics() {
    let packed = compress_buffer(&sample(6_000, 14), &opts(1_000, 1)).unwrap();
    for i in 0..packed.len() {
        let mut bad = packed.clone();
        bad[i] ^= 0xA5;
        let _ = decompress_buffer(&bad, &opts(1, 2));
    }
}
