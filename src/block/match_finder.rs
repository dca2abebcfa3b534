//! Single-slot hash match finder.
//!
//! Each 4-byte prefix hashes into a table that remembers only the most recent
//! position with that hash; there is no chain to walk, so the work per
//! position is constant.  The candidate is then extended to the right and,
//! when allowed, to the left.
//!
//! The table is owned by one [`MatchFinder`], which lives for the encoding of
//! one block and is dropped with it.

use super::types::{
    min_length_for_offset, read_le32, Match, EMPTY_SLOT, HASH_LOG, HASH_TABLE_SIZE,
    MAX_COPY_LENGTH, MAX_OFFSET, MIN_MATCH,
};

/// Knuth's multiplicative hashing constant.
const PRIME32: u32 = 2_654_435_761;

/// Finds back-references inside one buffer.
///
/// Queries must arrive with non-decreasing positions: every position up to
/// the queried one is inserted before the lookup, and each position is
/// inserted exactly once.
pub struct MatchFinder<'a> {
    buf: &'a [u8],
    table: Box<[u32]>,
    /// Next position that has not been inserted yet.
    last_indexed: usize,
}

impl<'a> MatchFinder<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        debug_assert!(buf.len() <= u32::MAX as usize);
        MatchFinder {
            buf,
            table: vec![EMPTY_SLOT; HASH_TABLE_SIZE].into_boxed_slice(),
            last_indexed: 0,
        }
    }

    /// Number of positions inserted so far.
    #[inline]
    pub fn indexed(&self) -> usize {
        self.last_indexed
    }

    #[inline]
    fn hash(&self, pos: usize) -> usize {
        (read_le32(self.buf, pos).wrapping_mul(PRIME32) >> (32 - HASH_LOG)) as usize
    }

    /// Inserts every un-indexed position up to and including `pos` and
    /// returns the previous position that shared `pos`'s hash.
    ///
    /// Returns `None` when the slot was empty, when the candidate lies farther
    /// back than [`MAX_OFFSET`], or when `pos` was already indexed by an
    /// earlier call.  `pos + MIN_MATCH` must not exceed the buffer length.
    pub fn add_to(&mut self, pos: usize) -> Option<usize> {
        debug_assert!(pos + MIN_MATCH <= self.buf.len());
        if pos < self.last_indexed {
            return None;
        }

        let mut prev = EMPTY_SLOT;
        while self.last_indexed <= pos {
            let h = self.hash(self.last_indexed);
            prev = self.table[h];
            self.table[h] = self.last_indexed as u32;
            self.last_indexed += 1;
        }

        if prev == EMPTY_SLOT || pos - prev as usize > MAX_OFFSET {
            return None;
        }
        Some(prev as usize)
    }

    /// Best match covering `pos`, or [`Match::NONE`].
    ///
    /// `last_location` is the end of the previously accepted match.  Left
    /// extension never reaches below it, so a new match can't claim bytes
    /// the previous token already consumed.
    pub fn get_longest_match(&mut self, pos: usize, last_location: usize) -> Match {
        let m = match self.add_to(pos) {
            Some(prev) => extend_candidate(self.buf, pos, prev, last_location),
            None => return Match::NONE,
        };
        Match {
            length: trim_length(m.length, m.offset),
            ..m
        }
    }
}

impl FindMatch for MatchFinder<'_> {
    #[inline]
    fn get_longest_match(&mut self, pos: usize, last_location: usize) -> Match {
        MatchFinder::get_longest_match(self, pos, last_location)
    }
}

/// Match search as the encoder drives it: positions arrive in non-decreasing
/// order and `last_location` is the end of the previous accepted match.
pub trait FindMatch {
    fn get_longest_match(&mut self, pos: usize, last_location: usize) -> Match;
}

/// Extends the candidate at `prev` to the right and, down to
/// `last_location`, to the left.  Returns [`Match::NONE`] when the result is
/// too short for its offset.  The length is not trimmed.
pub(crate) fn extend_candidate(buf: &[u8], pos: usize, prev: usize, last_location: usize) -> Match {
    // Comparing forward from `prev` may run into `pos`'s own region; that
    // is the self-overlapping case and is valid.
    let rlen = buf[prev..]
        .iter()
        .zip(&buf[pos..])
        .take_while(|(a, b)| a == b)
        .count();
    if rlen == 0 {
        return Match::NONE;
    }

    let mut llen = 0;
    if prev > 0 && pos > last_location {
        let max_llen = prev.min(pos - last_location);
        llen = buf[..prev]
            .iter()
            .rev()
            .zip(buf[..pos].iter().rev())
            .take(max_llen)
            .take_while(|(a, b)| a == b)
            .count();
    }

    let offset = pos - prev;
    let length = llen + rlen;
    if length < min_length_for_offset(offset) {
        return Match::NONE;
    }
    Match {
        location: pos - llen,
        length,
        offset,
    }
}

/// Drops a tail that would end up as a copy token too short to pay for itself
/// once the match is split into `MAX_COPY_LENGTH` pieces.
#[inline]
pub(crate) fn trim_length(length: usize, offset: usize) -> usize {
    if length > MAX_COPY_LENGTH {
        let tail = length % MAX_COPY_LENGTH;
        if tail < min_length_for_offset(offset) {
            return length - tail;
        }
    }
    length
}
