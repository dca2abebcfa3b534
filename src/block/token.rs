//! Token wire format.
//!
//! ```text
//! literal : 0lllllll                     run = l + 1          (1..=128 raw bytes follow)
//! copy    : 1Cvvvvvv [ext…] off…         length = MIN_MATCH + (ext << 6 | v)
//! ```
//!
//! `ext` is present only when `C` is set.  Both `ext` and `off` (which stores
//! `offset - 1`) are continuation integers: big-endian groups of 7 bits, the
//! high bit set on every byte except the last.

use super::decompress::DecompressError;
use super::types::{
    CONTINUATION_FLAG, COPY_FLAG, COPY_INLINE_BITS, COPY_INLINE_MASK, LITERAL_MASK,
    MAX_CONTINUATION_BYTES, MAX_LITERAL, MIN_MATCH,
};

/// A decoded control token.  Literal payload bytes are left in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Literal { run: usize },
    Copy { length: usize, offset: usize },
}

// ─────────────────────────────────────────────────────────────────────────────
// Continuation integers
// ─────────────────────────────────────────────────────────────────────────────

/// Bytes needed to store `value` as a continuation integer.
#[inline]
pub fn continuation_len(value: usize) -> usize {
    let mut n = 1;
    while n < usize::BITS as usize / 7 && value >> (7 * n) != 0 {
        n += 1;
    }
    n
}

/// Writes `value` at `dst[pos..]`.  Returns the new position, or `None` when
/// `dst` has no room.
pub fn write_continuation(dst: &mut [u8], pos: usize, value: usize) -> Option<usize> {
    let n = continuation_len(value);
    if pos + n > dst.len() {
        return None;
    }
    for i in 0..n {
        let shift = 7 * (n - 1 - i);
        let more = if i + 1 < n { 0x80 } else { 0 };
        dst[pos + i] = ((value >> shift) as u8 & 0x7F) | more;
    }
    Some(pos + n)
}

/// Reads a continuation integer at `src[pos..]`, returning the value and the
/// position after it.
pub fn read_continuation(src: &[u8], mut pos: usize) -> Result<(usize, usize), DecompressError> {
    let mut value = 0usize;
    for _ in 0..MAX_CONTINUATION_BYTES {
        let byte = *src.get(pos).ok_or(DecompressError::TruncatedToken)?;
        pos += 1;
        value = (value << 7) | (byte & 0x7F) as usize;
        if byte & 0x80 == 0 {
            return Ok((value, pos));
        }
    }
    Err(DecompressError::OversizedInteger)
}

// ─────────────────────────────────────────────────────────────────────────────
// Encoding
// ─────────────────────────────────────────────────────────────────────────────

/// Control byte for a literal run of `run` bytes (`1..=MAX_LITERAL`).
#[inline]
pub fn literal_control(run: usize) -> u8 {
    debug_assert!((1..=MAX_LITERAL).contains(&run));
    (run - 1) as u8
}

/// Encoded size of a copy token.
#[inline]
pub fn copy_token_len(length: usize, offset: usize) -> usize {
    let value = length - MIN_MATCH;
    let ext = if value > COPY_INLINE_MASK as usize {
        continuation_len(value >> COPY_INLINE_BITS)
    } else {
        0
    };
    1 + ext + continuation_len(offset - 1)
}

/// Writes one copy token at `dst[pos..]`.  Returns the new position, or
/// `None` when `dst` has no room.
pub fn write_copy(dst: &mut [u8], pos: usize, length: usize, offset: usize) -> Option<usize> {
    debug_assert!(length >= MIN_MATCH && offset >= 1);
    if pos + copy_token_len(length, offset) > dst.len() {
        return None;
    }
    let value = length - MIN_MATCH;
    let high = value >> COPY_INLINE_BITS;
    let mut control = COPY_FLAG | (value as u8 & COPY_INLINE_MASK);
    if high != 0 {
        control |= CONTINUATION_FLAG;
    }
    dst[pos] = control;
    let mut pos = pos + 1;
    if high != 0 {
        pos = write_continuation(dst, pos, high)?;
    }
    write_continuation(dst, pos, offset - 1)
}

// ─────────────────────────────────────────────────────────────────────────────
// Decoding
// ─────────────────────────────────────────────────────────────────────────────

/// Parses the control portion of the token at `src[pos]`.
///
/// For a literal the returned position points at the first raw byte; the
/// caller still has to bounds-check the payload.
pub fn read_token(src: &[u8], pos: usize) -> Result<(Token, usize), DecompressError> {
    let control = *src.get(pos).ok_or(DecompressError::TruncatedToken)?;
    let pos = pos + 1;

    if control & COPY_FLAG == 0 {
        let run = (control & LITERAL_MASK) as usize + 1;
        return Ok((Token::Literal { run }, pos));
    }

    let mut value = (control & COPY_INLINE_MASK) as usize;
    let mut pos = pos;
    if control & CONTINUATION_FLAG != 0 {
        let (high, next) = read_continuation(src, pos)?;
        value |= high << COPY_INLINE_BITS;
        pos = next;
    }
    let (offset_minus_one, pos) = read_continuation(src, pos)?;
    Ok((
        Token::Copy {
            length: value + MIN_MATCH,
            offset: offset_minus_one + 1,
        },
        pos,
    ))
}
