//! E2E Test Suite 04: Error Handling
//!
//! Checks what callers see when things go wrong:
//! - block codec errors render a message and compare by value
//! - container errors carry the failing block and chain to the codec error
//! - conversion to `io::Error` picks a kind the CLI can report
//! - corrupt or hostile input never panics

use std::error::Error as _;
use std::io;

use lz77::container::read_index;
use lz77::{
    compress_block, compress_buffer, decompress_block, decompress_buffer, CompressError,
    ContainerError, ContainerOptions, DecompressError,
};

fn opts(block_size: usize, nb_workers: usize) -> ContainerOptions {
    ContainerOptions::new(block_size, nb_workers)
}

fn pattern(len: usize) -> Vec<u8> {
    (0..len).map(|i| b"abcabdabeabf"[i % 12] ^ (i / 500) as u8).collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 1: block error messages
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_block_errors_display() {
    let cases: [(DecompressError, &[u8]); 4] = [
        (DecompressError::TruncatedHeader, &[1, 0]),
        (DecompressError::TruncatedToken, &[4, 0, 0, 3, b'a']),
        (DecompressError::OffsetOutOfRange, &[8, 0, 0, 0, b'a', 0x80, 1]),
        (DecompressError::OutputOverflow, &[1, 0, 0, 1, b'a', b'b']),
    ];
    for (expected, input) in cases {
        let err = decompress_block(input).unwrap_err();
        assert_eq!(err, expected);
        assert!(!err.to_string().is_empty());
    }
    assert!(!CompressError::InputTooLarge.to_string().is_empty());
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 2: container errors chain to the block error
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_decompress_error_chain() {
    let data = pattern(40_000);
    let mut packed = compress_buffer(&data, &opts(10_000, 1)).unwrap();
    let index = read_index(&packed).unwrap();
    let victim = index[2];
    let at = victim.location as usize;
    let claimed = victim.uncompressed_size - 1;
    packed[at..at + 3].copy_from_slice(&claimed.to_le_bytes()[..3]);

    let err = decompress_buffer(&packed, &opts(1, 1)).unwrap_err();
    assert!(err.to_string().starts_with("block 2:"), "{err}");
    let source = err
        .source()
        .and_then(|s| s.downcast_ref::<DecompressError>())
        .expect("codec error as source");
    assert_eq!(*source, DecompressError::SizeMismatch);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 3: io::Error kinds
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_io_error_kinds() {
    let bad_size: io::Error = compress_buffer(b"abc", &opts(0, 1)).unwrap_err().into();
    assert_eq!(bad_size.kind(), io::ErrorKind::InvalidInput);

    let truncated: io::Error = decompress_buffer(&[1, 2, 3], &opts(1, 1)).unwrap_err().into();
    assert_eq!(truncated.kind(), io::ErrorKind::InvalidData);

    let wrapped: io::Error =
        ContainerError::Io(io::Error::new(io::ErrorKind::PermissionDenied, "nope")).into();
    assert_eq!(wrapped.kind(), io::ErrorKind::PermissionDenied);
    assert_eq!(wrapped.to_string(), "nope");
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 4: oversized input
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_oversized_block_input() {
    let big = vec![0u8; 1 << 24];
    assert_eq!(compress_block(&big), Err(CompressError::InputTooLarge));
    assert!(matches!(
        compress_buffer(&big, &opts(20_000_000, 1)),
        Err(ContainerError::InvalidBlockSize(20_000_000))
    ));
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 5: hostile containers
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_hostile_headers_do_not_panic() {
    // Index location past the end.
    let mut header = Vec::new();
    header.extend_from_slice(&u64::MAX.to_le_bytes());
    header.extend_from_slice(&1u32.to_le_bytes());
    assert!(matches!(
        decompress_buffer(&header, &opts(1, 2)),
        Err(ContainerError::IndexOutOfBounds { .. })
    ));

    // Entry count far larger than the file could hold.
    let mut header = Vec::new();
    header.extend_from_slice(&12u64.to_le_bytes());
    header.extend_from_slice(&u32::MAX.to_le_bytes());
    assert!(decompress_buffer(&header, &opts(1, 2)).is_err());
}

#[test]
fn test_byte_flips_do_not_panic() {
    let packed = compress_buffer(&pattern(20_000), &opts(3_000, 2)).unwrap();
    for i in (0..packed.len()).step_by(7) {
        let mut damaged = packed.clone();
        damaged[i] ^= 0x5A;
        let _ = decompress_buffer(&damaged, &opts(1, 2));
    }
}
