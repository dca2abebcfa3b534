//! Block constants, the [`Match`] value type, and small byte helpers shared by
//! the match finder, encoder, and decoder.
//!
//! Every constant that shapes the token stream lives here so the encoder and
//! decoder can never disagree about the format.

// ─────────────────────────────────────────────────────────────────────────────
// Format constants
// ─────────────────────────────────────────────────────────────────────────────

/// Width of the little-endian uncompressed-size header at the start of a block.
pub const BLOCK_HEADER_SIZE: usize = 3;

/// Largest input a single block can describe (3-byte size header).
pub const MAX_BLOCK_SIZE: usize = (1 << 24) - 1;

/// Shortest back-reference the encoder will ever emit; also the width of the
/// hashed prefix.
pub const MIN_MATCH: usize = 4;

/// Longest run a single literal token can carry.
pub const MAX_LITERAL: usize = 128;

/// Bits of `length - MIN_MATCH` stored inline in a copy control byte.
pub const COPY_INLINE_BITS: u32 = 6;
pub const COPY_INLINE_MASK: u8 = (1 << COPY_INLINE_BITS) - 1;

/// Control-byte flags.
pub const COPY_FLAG: u8 = 0b1000_0000;
pub const CONTINUATION_FLAG: u8 = 0b0100_0000;
pub const LITERAL_MASK: u8 = 0b0111_1111;

/// Longest copy a single token carries: the inline bits plus one 7-bit
/// extension byte.
pub const MAX_COPY_LENGTH: usize = MIN_MATCH + (1 << 13) - 1;

/// Largest distance the match finder will reach back.
/// `offset - 1` always fits three continuation bytes.
pub const MAX_OFFSET: usize = 1 << 21;

/// Offsets up to this distance encode in at most two continuation bytes.
pub const NEAR_OFFSET: usize = 1 << 14;

/// Continuation integers longer than this are rejected by the decoder.
pub const MAX_CONTINUATION_BYTES: usize = 4;

// ─────────────────────────────────────────────────────────────────────────────
// Hash-table sizing
// ─────────────────────────────────────────────────────────────────────────────

pub const HASH_LOG: u32 = 17;
pub const HASH_TABLE_SIZE: usize = 1 << HASH_LOG;

/// Marks an empty hash slot.
pub const EMPTY_SLOT: u32 = u32::MAX;

/// The chain finder keeps one `prev` link per position in a ring of
/// `2^CHAIN_LOG` slots, so links older than that are gone.
pub const CHAIN_LOG: u32 = 16;
pub const CHAIN_SIZE: usize = 1 << CHAIN_LOG;
pub const CHAIN_MASK: usize = CHAIN_SIZE - 1;

/// A chain walk stops as soon as a match this long is found.
pub const GOOD_LENGTH: usize = 32;

// ─────────────────────────────────────────────────────────────────────────────
// Compression levels
// ─────────────────────────────────────────────────────────────────────────────

pub const LEVEL_MIN: u32 = 1;
/// Single-slot search.
pub const LEVEL_DEFAULT: u32 = 1;
pub const LEVEL_MAX: u32 = 9;

/// Candidates examined per position, indexed by `level - 1`.
const SEARCH_DEPTH: [usize; LEVEL_MAX as usize] = [1, 2, 4, 6, 8, 12, 16, 24, 32];

/// Chain candidates examined per position at `level`.  Out-of-range levels
/// are clamped.  A depth of 1 is the single-slot finder.
#[inline]
pub fn search_depth(level: u32) -> usize {
    SEARCH_DEPTH[(level.clamp(LEVEL_MIN, LEVEL_MAX) - 1) as usize]
}

// ─────────────────────────────────────────────────────────────────────────────
// Match
// ─────────────────────────────────────────────────────────────────────────────

/// A back-reference reported by the match finder.
///
/// `length` bytes at `location` equal `length` bytes at `location - offset`.
/// When `offset < length` the copy overlaps itself and reproduces the
/// `offset`-byte pattern periodically.  A `length` of zero means "no match".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Match {
    pub location: usize,
    pub length: usize,
    pub offset: usize,
}

impl Match {
    /// The rejected / absent match.
    pub const NONE: Match = Match { location: 0, length: 0, offset: 0 };

    #[inline]
    pub fn is_none(&self) -> bool {
        self.length == 0
    }

    /// One past the last byte covered by this match.
    #[inline]
    pub fn end(&self) -> usize {
        self.location + self.length
    }
}

/// Minimum length a match at `offset` must reach before it is cheaper than
/// literals.  Monotone in `offset`.
#[inline]
pub fn min_length_for_offset(offset: usize) -> usize {
    if offset <= NEAR_OFFSET {
        MIN_MATCH
    } else {
        MIN_MATCH + 1
    }
}

/// Worst-case encoded size for `input_size` bytes, header included.
///
/// Every copy token saves at least one byte over the literals it replaces,
/// so the all-literal layout plus one spare byte bounds the output.
#[inline]
pub fn compress_bound(input_size: usize) -> usize {
    BLOCK_HEADER_SIZE + input_size + input_size / MAX_LITERAL + 1
}

// ─────────────────────────────────────────────────────────────────────────────
// Byte helpers
// ─────────────────────────────────────────────────────────────────────────────

#[inline]
pub fn read_le24(src: &[u8]) -> usize {
    src[0] as usize | (src[1] as usize) << 8 | (src[2] as usize) << 16
}

#[inline]
pub fn write_le24(dst: &mut [u8], value: usize) {
    debug_assert!(value <= MAX_BLOCK_SIZE);
    dst[0] = value as u8;
    dst[1] = (value >> 8) as u8;
    dst[2] = (value >> 16) as u8;
}

#[inline]
pub fn read_le32(src: &[u8], pos: usize) -> u32 {
    u32::from_le_bytes([src[pos], src[pos + 1], src[pos + 2], src[pos + 3]])
}
