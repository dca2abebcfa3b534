//! E2E Test Suite 01: Block One-Shot API
//!
//! Exercises the crate-root block functions as a library user would:
//! - compress_block
//! - decompress_block
//! - compress_bound
//!
//! Inputs cover text, binary, runs, and sizes around the token limits.

use lz77::{compress_block, compress_bound, decompress_block, CompressError, DecompressError};

fn lcg_bytes(len: usize, seed: u32) -> Vec<u8> {
    let mut x = seed;
    (0..len)
        .map(|_| {
            x = x.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            (x >> 24) as u8
        })
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 1: typical text round trip
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_text_roundtrip_shrinks() {
    let original = b"The quick brown fox jumps over the lazy dog. ".repeat(20);
    let compressed = compress_block(&original).expect("compression should succeed");
    assert!(
        compressed.len() < original.len(),
        "compressed size {} should be less than original {}",
        compressed.len(),
        original.len()
    );
    assert_eq!(decompress_block(&compressed).unwrap(), original);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 2: incompressible input stays within the bound
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_random_roundtrip_within_bound() {
    for &len in &[1usize, 3, 4, 100, 128, 129, 4096, 100_000] {
        let original = lcg_bytes(len, len as u32);
        let compressed = compress_block(&original).unwrap();
        assert!(compressed.len() <= compress_bound(len), "len {len}");
        assert_eq!(decompress_block(&compressed).unwrap(), original);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 3: single-byte runs use self-overlapping copies
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_runs_compress_heavily() {
    for &len in &[5usize, 64, 8195, 8196, 8200, 50_000, 1_000_000] {
        let original = vec![b'A'; len];
        let compressed = compress_block(&original).unwrap();
        assert!(compressed.len() < 10 + len / 1000, "len {len} -> {}", compressed.len());
        assert_eq!(decompress_block(&compressed).unwrap(), original);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 4: repeats at every distance class
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_repeats_near_and_far() {
    for &gap in &[1usize, 100, 16_000, 16_400, 500_000, 2_000_000] {
        let motif = lcg_bytes(64, gap as u32);
        let mut original = motif.clone();
        original.extend(lcg_bytes(gap, 99));
        original.extend_from_slice(&motif);
        let compressed = compress_block(&original).unwrap();
        assert_eq!(decompress_block(&compressed).unwrap(), original, "gap {gap}");
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 5: mixed content
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_mixed_content_roundtrip() {
    let mut original = Vec::new();
    for i in 0..200u32 {
        original.extend_from_slice(format!("record {:05} status=ok\n", i % 37).as_bytes());
        original.extend(lcg_bytes((i % 9) as usize, i));
        original.extend(std::iter::repeat(b'-').take((i % 13) as usize));
    }
    let compressed = compress_block(&original).unwrap();
    assert!(compressed.len() < original.len() / 2);
    assert_eq!(decompress_block(&compressed).unwrap(), original);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 6: size header
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_header_records_size() {
    let original = lcg_bytes(70_000, 5);
    let compressed = compress_block(&original).unwrap();
    let header = compressed[0] as usize | (compressed[1] as usize) << 8 | (compressed[2] as usize) << 16;
    assert_eq!(header, 70_000);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 7: error surface
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_errors() {
    assert_eq!(
        compress_block(&vec![0u8; 1 << 24]),
        Err(CompressError::InputTooLarge)
    );
    assert_eq!(decompress_block(&[]), Err(DecompressError::TruncatedHeader));
    assert_eq!(decompress_block(&[9, 0, 0]), Err(DecompressError::OutputUnderflow));
}
