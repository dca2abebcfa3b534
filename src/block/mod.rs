//! LZ77 block compression and decompression.
//!
//! A block is a 3-byte little-endian uncompressed size followed by a stream
//! of literal and copy tokens (see [`token`] for the wire layout).  Blocks are
//! self-describing and independent of each other, which is what lets the
//! container process them in parallel.

pub mod chain_finder;
pub mod compress;
pub mod decompress;
pub mod match_finder;
pub mod token;
pub mod types;

// Re-export the most important public API items at the module level.
pub use chain_finder::ChainMatchFinder;
pub use compress::{
    compress_block, compress_block_into, compress_block_into_level, compress_block_level,
    CompressError,
};
pub use decompress::{
    decompress_block, decompress_block_sized, decompress_tokens, decompressed_size,
    DecompressError,
};
pub use match_finder::{FindMatch, MatchFinder};
pub use types::{
    compress_bound, search_depth, Match, LEVEL_DEFAULT, LEVEL_MAX, LEVEL_MIN, MAX_BLOCK_SIZE,
    MAX_OFFSET, MIN_MATCH,
};
