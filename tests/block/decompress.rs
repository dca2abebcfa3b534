// Tests for the block decoder (block/decompress.rs).
//
// The decoder is the untrusted-input boundary: every malformed block must
// come back as a DecompressError, never a panic or a wrong-length output.

use crate::common::{noise, text};
use lz77::block::compress::compress_block;
use lz77::block::decompress::{
    decompress_block, decompress_block_sized, decompress_tokens, decompressed_size,
    DecompressError,
};
use lz77::block::types::{CONTINUATION_FLAG, COPY_FLAG};

// ─────────────────────────────────────────────────────────────────────────────
// Hand-built streams
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn literal_only() {
    let block = [5, 0, 0, 4, b'h', b'e', b'l', b'l', b'o'];
    assert_eq!(decompress_block(&block).unwrap(), b"hello");
}

#[test]
fn overlapping_copy_replicates_period() {
    let block = [9, 0, 0, 2, b'a', b'b', b'c', COPY_FLAG | 2, 2];
    assert_eq!(decompress_block(&block).unwrap(), b"abcabcabc");
}

#[test]
fn extended_length_copy() {
    // length = 4 + (1 << 6 | 0) = 68
    let block = [69, 0, 0, 0, b'z', COPY_FLAG | CONTINUATION_FLAG, 1, 0];
    assert_eq!(decompress_block(&block).unwrap(), vec![b'z'; 69]);
}

#[test]
fn multi_byte_offset() {
    let mut src = noise(200, 1);
    let head = src[..10].to_vec();
    src.extend_from_slice(&head);
    let mut block = vec![210, 0, 0, 127];
    block.extend_from_slice(&src[..128]);
    block.push(71);
    block.extend_from_slice(&src[128..200]);
    // length 10, offset 200 → offset - 1 = 199 = 0x81 0x47
    block.extend_from_slice(&[COPY_FLAG | 6, 0x81, 0x47]);
    assert_eq!(decompress_block(&block).unwrap(), src);
}

#[test]
fn decompress_tokens_needs_exact_destination() {
    let tokens = [2, b'a', b'b', b'c'];
    let mut dst = [0u8; 3];
    assert_eq!(decompress_tokens(&tokens, &mut dst), Ok(3));
    assert_eq!(&dst, b"abc");

    let mut big = [0u8; 4];
    assert_eq!(
        decompress_tokens(&tokens, &mut big),
        Err(DecompressError::OutputUnderflow)
    );
    let mut small = [0u8; 2];
    assert_eq!(
        decompress_tokens(&tokens, &mut small),
        Err(DecompressError::OutputOverflow)
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Header handling
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn decompressed_size_reads_header() {
    assert_eq!(decompressed_size(&[0x10, 0x27, 0x00, 0xFF]), Ok(10_000));
    assert_eq!(decompressed_size(&[1, 2]), Err(DecompressError::TruncatedHeader));
}

#[test]
fn sized_decode_checks_header() {
    let block = compress_block(b"some bytes").unwrap();
    assert_eq!(decompress_block_sized(&block, 10).unwrap(), b"some bytes");
    assert_eq!(
        decompress_block_sized(&block, 11),
        Err(DecompressError::SizeMismatch)
    );
}

#[test]
fn header_larger_than_stream_is_underflow() {
    let block = [6, 0, 0, 2, b'a', b'b', b'c'];
    assert_eq!(decompress_block(&block), Err(DecompressError::OutputUnderflow));
}

// ─────────────────────────────────────────────────────────────────────────────
// Malformed streams
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn copy_at_start_is_out_of_range() {
    let block = [4, 0, 0, COPY_FLAG, 0];
    assert_eq!(decompress_block(&block), Err(DecompressError::OffsetOutOfRange));
}

#[test]
fn oversized_offset_integer() {
    let block = [8, 0, 0, 0, b'a', COPY_FLAG, 0x80, 0x80, 0x80, 0x80, 0x00];
    assert_eq!(decompress_block(&block), Err(DecompressError::OversizedInteger));
}

#[test]
fn copy_without_offset_is_truncated() {
    let block = [8, 0, 0, 0, b'a', COPY_FLAG | 3];
    assert_eq!(decompress_block(&block), Err(DecompressError::TruncatedToken));
}

#[test]
fn every_truncation_is_an_error() {
    let src = text(3000);
    let block = compress_block(&src).unwrap();
    for cut in 0..block.len() {
        assert!(decompress_block(&block[..cut]).is_err(), "cut at {cut}");
    }
}

#[test]
fn corrupted_bytes_never_panic() {
    let src = text(2000);
    let block = compress_block(&src).unwrap();
    for i in 3..block.len() {
        for flip in [0x01u8, 0x40, 0x80, 0xFF] {
            let mut bad = block.clone();
            bad[i] ^= flip;
            if let Ok(out) = decompress_block(&bad) {
                assert_eq!(out.len(), src.len());
            }
        }
    }
}

#[test]
fn arbitrary_bytes_never_panic() {
    for seed in 1..200u64 {
        let junk = noise(64 + seed as usize, seed);
        let _ = decompress_block(&junk);
    }
}

#[test]
fn error_display_is_lowercase_message() {
    for e in [
        DecompressError::TruncatedHeader,
        DecompressError::TruncatedToken,
        DecompressError::OversizedInteger,
        DecompressError::OffsetOutOfRange,
        DecompressError::OutputOverflow,
        DecompressError::OutputUnderflow,
        DecompressError::SizeMismatch,
    ] {
        let msg = e.to_string();
        assert!(!msg.is_empty());
        assert!(msg.chars().next().unwrap().is_lowercase(), "{msg}");
    }
}
