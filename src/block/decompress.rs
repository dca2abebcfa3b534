//! Block decoder.
//!
//! # Security boundary
//!
//! This is the path that sees untrusted bytes.  Every token is bounds-checked
//! against both the source and the destination before any byte moves, and
//! malformed or truncated input returns a [`DecompressError`]; it must never
//! panic.

use std::fmt;

use super::token::{read_token, Token};
use super::types::{read_le24, BLOCK_HEADER_SIZE};

// ─────────────────────────────────────────────────────────────────────────────
// Error type
// ─────────────────────────────────────────────────────────────────────────────

/// Errors returned by block decompression.  Every variant means the stream is
/// malformed; none is recoverable for the block at hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecompressError {
    /// Fewer than three bytes, so there is no size header.
    TruncatedHeader,
    /// The source ended in the middle of a token or its literal payload.
    TruncatedToken,
    /// A continuation integer ran past four bytes.
    OversizedInteger,
    /// A copy reaches back before the start of the output.
    OffsetOutOfRange,
    /// A token would write past the declared uncompressed size.
    OutputOverflow,
    /// The token stream ended before the declared size was produced.
    OutputUnderflow,
    /// The block header disagrees with the size the caller expected.
    SizeMismatch,
}

impl fmt::Display for DecompressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            DecompressError::TruncatedHeader => "block too short for its size header",
            DecompressError::TruncatedToken => "stream ends inside a token",
            DecompressError::OversizedInteger => "variable-width integer too long",
            DecompressError::OffsetOutOfRange => "copy offset exceeds decoded length",
            DecompressError::OutputOverflow => "token overruns the uncompressed size",
            DecompressError::OutputUnderflow => "stream ends before the uncompressed size",
            DecompressError::SizeMismatch => "block header disagrees with expected size",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for DecompressError {}

// ─────────────────────────────────────────────────────────────────────────────
// Core loop
// ─────────────────────────────────────────────────────────────────────────────

/// Copies `length` bytes from `offset` bytes behind `op` to `op`.
///
/// Must go one byte at a time: with `offset < length` the source region
/// includes bytes written earlier in this same copy.
#[inline]
fn copy_match(dst: &mut [u8], op: usize, offset: usize, length: usize) {
    for i in op..op + length {
        dst[i] = dst[i - offset];
    }
}

/// Decodes a header-less token stream into `dst`, which must be exactly the
/// uncompressed size.  Returns the number of bytes written (always
/// `dst.len()` on success).
pub fn decompress_tokens(src: &[u8], dst: &mut [u8]) -> Result<usize, DecompressError> {
    let mut ip = 0usize;
    let mut op = 0usize;

    while ip < src.len() {
        let (token, next) = read_token(src, ip)?;
        ip = next;

        match token {
            Token::Literal { run } => {
                if run > src.len() - ip {
                    return Err(DecompressError::TruncatedToken);
                }
                if run > dst.len() - op {
                    return Err(DecompressError::OutputOverflow);
                }
                dst[op..op + run].copy_from_slice(&src[ip..ip + run]);
                ip += run;
                op += run;
            }
            Token::Copy { length, offset } => {
                if offset > op {
                    return Err(DecompressError::OffsetOutOfRange);
                }
                if length > dst.len() - op {
                    return Err(DecompressError::OutputOverflow);
                }
                copy_match(dst, op, offset, length);
                op += length;
            }
        }
    }

    if op != dst.len() {
        return Err(DecompressError::OutputUnderflow);
    }
    Ok(op)
}

// ─────────────────────────────────────────────────────────────────────────────
// Public API
// ─────────────────────────────────────────────────────────────────────────────

/// Reads the uncompressed size from a block header.
pub fn decompressed_size(src: &[u8]) -> Result<usize, DecompressError> {
    if src.len() < BLOCK_HEADER_SIZE {
        return Err(DecompressError::TruncatedHeader);
    }
    Ok(read_le24(src))
}

/// Decodes a complete block (header + tokens) into an exactly sized `Vec`.
pub fn decompress_block(src: &[u8]) -> Result<Vec<u8>, DecompressError> {
    let size = decompressed_size(src)?;
    let mut dst = vec![0u8; size];
    decompress_tokens(&src[BLOCK_HEADER_SIZE..], &mut dst)?;
    Ok(dst)
}

/// Decodes a complete block whose size is also known from elsewhere (the
/// container index).  The header must agree with `expected_size`.
pub fn decompress_block_sized(src: &[u8], expected_size: usize) -> Result<Vec<u8>, DecompressError> {
    if decompressed_size(src)? != expected_size {
        return Err(DecompressError::SizeMismatch);
    }
    decompress_block(src)
}
