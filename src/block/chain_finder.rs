//! Hash-chain match finder used at higher compression levels.
//!
//! The head table is the single-slot table of [`MatchFinder`], so the first
//! candidate is always the one the fast finder would try.  Each insertion
//! also records the position it displaced in a `prev` ring of
//! [`CHAIN_SIZE`] links, and a lookup walks that ring to older positions
//! with the same hash, keeping the longest match it sees.
//!
//! [`MatchFinder`]: super::match_finder::MatchFinder

use super::match_finder::{extend_candidate, trim_length, FindMatch};
use super::types::{
    read_le32, search_depth, Match, CHAIN_MASK, CHAIN_SIZE, EMPTY_SLOT, GOOD_LENGTH, HASH_LOG,
    HASH_TABLE_SIZE, LEVEL_MAX, MAX_OFFSET, MIN_MATCH,
};

const PRIME32: u32 = 2_654_435_761;

/// Finds back-references inside one buffer by walking hash chains.
///
/// Same query contract as [`MatchFinder`](super::match_finder::MatchFinder):
/// positions arrive in non-decreasing order and each one is inserted exactly
/// once before it is looked up.
pub struct ChainMatchFinder<'a> {
    buf: &'a [u8],
    head: Box<[u32]>,
    prev: Box<[u32]>,
    last_indexed: usize,
    max_candidates: usize,
}

impl<'a> ChainMatchFinder<'a> {
    /// Finder with the deepest search.
    pub fn new(buf: &'a [u8]) -> Self {
        Self::with_level(buf, LEVEL_MAX)
    }

    /// Finder examining [`search_depth`]`(level)` candidates per position.
    pub fn with_level(buf: &'a [u8], level: u32) -> Self {
        debug_assert!(buf.len() <= u32::MAX as usize);
        ChainMatchFinder {
            buf,
            head: vec![EMPTY_SLOT; HASH_TABLE_SIZE].into_boxed_slice(),
            prev: vec![EMPTY_SLOT; CHAIN_SIZE].into_boxed_slice(),
            last_indexed: 0,
            max_candidates: search_depth(level),
        }
    }

    #[inline]
    pub fn indexed(&self) -> usize {
        self.last_indexed
    }

    #[inline]
    fn hash(&self, pos: usize) -> usize {
        (read_le32(self.buf, pos).wrapping_mul(PRIME32) >> (32 - HASH_LOG)) as usize
    }

    /// Inserts every un-indexed position up to and including `pos`, linking
    /// each into its chain, and returns the most recent earlier position
    /// with `pos`'s hash.  `None` under the same conditions as the
    /// single-slot finder.
    pub fn add_to(&mut self, pos: usize) -> Option<usize> {
        debug_assert!(pos + MIN_MATCH <= self.buf.len());
        if pos < self.last_indexed {
            return None;
        }

        let mut prev = EMPTY_SLOT;
        while self.last_indexed <= pos {
            let at = self.last_indexed;
            let h = self.hash(at);
            prev = self.head[h];
            self.prev[at & CHAIN_MASK] = prev;
            self.head[h] = at as u32;
            self.last_indexed += 1;
        }

        if prev == EMPTY_SLOT || pos - prev as usize > MAX_OFFSET {
            return None;
        }
        Some(prev as usize)
    }

    /// Next older candidate after `cand` on `pos`'s chain.
    ///
    /// The link of `cand` is only trustworthy while no later position has
    /// reused its ring slot, i.e. while `pos - cand < CHAIN_SIZE`.
    #[inline]
    fn next_candidate(&self, cand: usize, pos: usize) -> Option<usize> {
        if pos - cand >= CHAIN_SIZE {
            return None;
        }
        let next = self.prev[cand & CHAIN_MASK];
        if next == EMPTY_SLOT {
            return None;
        }
        let next = next as usize;
        if next >= cand || pos - next > MAX_OFFSET {
            return None;
        }
        Some(next)
    }

    /// Longest match covering `pos` among the chain's candidates, or
    /// [`Match::NONE`].  Left extension stops at `last_location` exactly as
    /// in the single-slot finder.  Ties keep the nearer candidate.
    pub fn get_longest_match(&mut self, pos: usize, last_location: usize) -> Match {
        let mut cand = self.add_to(pos);
        let mut best = Match::NONE;
        let mut tried = 0;

        while let Some(c) = cand {
            if tried == self.max_candidates {
                break;
            }
            tried += 1;

            let m = extend_candidate(self.buf, pos, c, last_location);
            if m.length > best.length {
                best = m;
                if best.length >= GOOD_LENGTH {
                    break;
                }
            }
            cand = self.next_candidate(c, pos);
        }

        if best.is_none() {
            return best;
        }
        Match {
            length: trim_length(best.length, best.offset),
            ..best
        }
    }
}

impl FindMatch for ChainMatchFinder<'_> {
    #[inline]
    fn get_longest_match(&mut self, pos: usize, last_location: usize) -> Match {
        ChainMatchFinder::get_longest_match(self, pos, last_location)
    }
}
