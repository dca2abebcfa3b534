//! Block encoder.
//!
//! Walks the input left to right, asking a match finder for a match at each
//! position.  Level 1 uses the single-slot [`MatchFinder`]; higher levels use
//! the [`ChainMatchFinder`] and only change which matches are found, never
//! the token format.  Unmatched bytes accumulate until a match is accepted, at
//! which point they are flushed as literal tokens followed by the copy.
//!
//! The destination is a caller-supplied slice.  Running out of room returns
//! [`CompressError::CapacityExceeded`]; with a buffer of at least
//! [`compress_bound`] bytes that never happens.

use std::fmt;

use super::chain_finder::ChainMatchFinder;
use super::match_finder::{FindMatch, MatchFinder};
use super::token::{literal_control, write_copy};
use super::types::{
    compress_bound, search_depth, write_le24, BLOCK_HEADER_SIZE, LEVEL_DEFAULT, MAX_BLOCK_SIZE,
    MAX_COPY_LENGTH, MAX_LITERAL, MIN_MATCH,
};

// ─────────────────────────────────────────────────────────────────────────────
// Error type
// ─────────────────────────────────────────────────────────────────────────────

/// Errors returned by block compression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressError {
    /// The input is larger than [`MAX_BLOCK_SIZE`] and can't be described by
    /// the 3-byte header.
    InputTooLarge,
    /// The destination buffer filled up before the block was complete.
    CapacityExceeded,
}

impl fmt::Display for CompressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompressError::InputTooLarge => {
                write!(f, "input exceeds the maximum block size of {} bytes", MAX_BLOCK_SIZE)
            }
            CompressError::CapacityExceeded => f.write_str("destination buffer too small"),
        }
    }
}

impl std::error::Error for CompressError {}

// ─────────────────────────────────────────────────────────────────────────────
// Token emission
// ─────────────────────────────────────────────────────────────────────────────

/// Writes `lits` as one or more literal tokens starting at `dst[op]`.
fn emit_literals(lits: &[u8], dst: &mut [u8], mut op: usize) -> Result<usize, CompressError> {
    for run in lits.chunks(MAX_LITERAL) {
        if op + 1 + run.len() > dst.len() {
            return Err(CompressError::CapacityExceeded);
        }
        dst[op] = literal_control(run.len());
        dst[op + 1..op + 1 + run.len()].copy_from_slice(run);
        op += 1 + run.len();
    }
    Ok(op)
}

/// Writes a match as copy tokens of at most [`MAX_COPY_LENGTH`] bytes each.
fn emit_copy(
    dst: &mut [u8],
    mut op: usize,
    length: usize,
    offset: usize,
) -> Result<usize, CompressError> {
    let mut remaining = length;
    while remaining > 0 {
        let n = remaining.min(MAX_COPY_LENGTH);
        debug_assert!(n >= MIN_MATCH);
        op = write_copy(dst, op, n, offset).ok_or(CompressError::CapacityExceeded)?;
        remaining -= n;
    }
    Ok(op)
}

/// Greedy parse of `src` with `finder`, writing tokens from `dst[op]`.
/// Returns the end of the token stream.
fn encode<F: FindMatch>(
    src: &[u8],
    dst: &mut [u8],
    mut op: usize,
    mut finder: F,
) -> Result<usize, CompressError> {
    let mut anchor = 0usize;
    let limit = src.len() - MIN_MATCH;
    let mut last_location = 0usize;
    // Position 0 has nothing behind it; it still gets indexed by the first
    // lookup.
    let mut ip = 1usize;

    while ip <= limit {
        let m = finder.get_longest_match(ip, last_location);
        if m.is_none() {
            ip += 1;
            continue;
        }

        op = emit_literals(&src[anchor..m.location], dst, op)?;
        op = emit_copy(dst, op, m.length, m.offset)?;

        anchor = m.end();
        last_location = anchor;
        ip = anchor;
    }

    emit_literals(&src[anchor..], dst, op)
}

// ─────────────────────────────────────────────────────────────────────────────
// Public API
// ─────────────────────────────────────────────────────────────────────────────

/// Compresses `src` into `dst` at `level`, returning the number of bytes
/// written.
///
/// The output starts with the 3-byte uncompressed size and is followed by the
/// token stream.  An empty input produces a header-only block.  Levels
/// outside `LEVEL_MIN..=LEVEL_MAX` are clamped; every level decodes with
/// the same decoder.
pub fn compress_block_into_level(
    src: &[u8],
    dst: &mut [u8],
    level: u32,
) -> Result<usize, CompressError> {
    if src.len() > MAX_BLOCK_SIZE {
        return Err(CompressError::InputTooLarge);
    }
    if dst.len() < BLOCK_HEADER_SIZE {
        return Err(CompressError::CapacityExceeded);
    }

    let op = if src.len() < MIN_MATCH {
        emit_literals(src, dst, BLOCK_HEADER_SIZE)?
    } else if search_depth(level) == 1 {
        encode(src, dst, BLOCK_HEADER_SIZE, MatchFinder::new(src))?
    } else {
        encode(src, dst, BLOCK_HEADER_SIZE, ChainMatchFinder::with_level(src, level))?
    };
    write_le24(dst, src.len());
    Ok(op)
}

/// [`compress_block_into_level`] at [`LEVEL_DEFAULT`].
pub fn compress_block_into(src: &[u8], dst: &mut [u8]) -> Result<usize, CompressError> {
    compress_block_into_level(src, dst, LEVEL_DEFAULT)
}

/// Compresses `src` at `level` into a freshly allocated, exactly sized `Vec`.
pub fn compress_block_level(src: &[u8], level: u32) -> Result<Vec<u8>, CompressError> {
    if src.len() > MAX_BLOCK_SIZE {
        return Err(CompressError::InputTooLarge);
    }
    let mut dst = vec![0u8; compress_bound(src.len())];
    let n = compress_block_into_level(src, &mut dst, level)?;
    dst.truncate(n);
    Ok(dst)
}

/// Compresses `src` into a freshly allocated, exactly sized `Vec`.
pub fn compress_block(src: &[u8]) -> Result<Vec<u8>, CompressError> {
    compress_block_level(src, LEVEL_DEFAULT)
}
