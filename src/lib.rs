// lz77r: LZ77 codec with a block-parallel container

pub mod config;
pub mod util;
pub mod threadpool;
pub mod io;
pub mod block;
pub mod container;
pub mod cli;

// ── Version constants ────────────────────────────────────────────────────────
pub const LZ77_VERSION_MAJOR: u32 = 0;
pub const LZ77_VERSION_MINOR: u32 = 3;
pub const LZ77_VERSION_RELEASE: u32 = 0;
pub const LZ77_VERSION_NUMBER: u32 =
    LZ77_VERSION_MAJOR * 100 * 100 + LZ77_VERSION_MINOR * 100 + LZ77_VERSION_RELEASE;
pub const LZ77_VERSION_STRING: &str = env!("CARGO_PKG_VERSION");

/// Returns the runtime version number.
pub fn version_number() -> u32 {
    LZ77_VERSION_NUMBER
}

/// Returns the runtime version string.
pub fn version_string() -> &'static str {
    LZ77_VERSION_STRING
}

// ── Top-level re-exports ─────────────────────────────────────────────────────
pub use block::{
    compress_block, compress_block_level, compress_bound, decompress_block, CompressError,
    DecompressError,
};
pub use container::{
    compress_buffer, compress_container, decompress_buffer, decompress_container, ContainerError,
    ContainerOptions, ContainerSummary,
};
