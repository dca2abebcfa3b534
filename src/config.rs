// config.rs: Compile-time configuration constants.
//
// Runtime overrides come from the environment (read by `io::prefs`) and from
// command-line flags.

// Size multipliers for `K` / `M` suffixes and human-readable sizes.
pub const KB: usize = 1 << 10;
pub const MB: usize = 1 << 20;

// Default number of uncompressed bytes per container block.
// Can be overridden by the LZ77_BLOCKSIZE environment variable,
// or by the -B command-line flag.
pub const BLOCK_SIZE_DEFAULT: usize = 10_000_000;

// Default number of worker threads (0 = auto-detect from physical cores).
// Can be overridden by the LZ77_NBWORKERS environment variable,
// or by the -T command-line flag.
pub const NB_WORKERS_DEFAULT: usize = 0;

// Maximum number of worker threads selectable at runtime.
pub const NB_WORKERS_MAX: usize = 200;

// Suffix appended to compressed files and stripped on decompression.
pub const LZ77_EXTENSION: &str = ".lz77";

// Environment variable names.
pub const ENV_NBWORKERS: &str = "LZ77_NBWORKERS";
pub const ENV_BLOCKSIZE: &str = "LZ77_BLOCKSIZE";
