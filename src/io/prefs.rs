// prefs.rs: I/O preferences and the display globals.
//
// - `DISPLAY_LEVEL` is a process-wide atomic so worker threads can gate
//   their own diagnostics without a handle to the preferences.
// - `Prefs` is a plain value type owned by the caller; setters clamp to the
//   valid range and return the value actually stored.

use std::sync::atomic::{AtomicI32, Ordering};

use crate::config::{BLOCK_SIZE_DEFAULT, ENV_BLOCKSIZE, NB_WORKERS_MAX};
use crate::block::{LEVEL_DEFAULT, LEVEL_MAX, LEVEL_MIN};
use crate::container::{ContainerOptions, MAX_CONTAINER_BLOCK_SIZE};
use crate::util::default_nb_workers;

// ---------------------------------------------------------------------------
// Display / notification globals
// ---------------------------------------------------------------------------

/// Global notification level. 0 = silent, 1 = errors only, 2 = results +
/// warnings, 3 = progress, 4+ = verbose.
pub static DISPLAY_LEVEL: AtomicI32 = AtomicI32::new(2);

/// Write `msg` to stderr if the current notification level is ≥ `level`.
/// Flushes stderr when level ≥ 4.
#[inline]
pub fn display_level(level: i32, msg: &str) {
    if DISPLAY_LEVEL.load(Ordering::Relaxed) >= level {
        eprint!("{}", msg);
        if DISPLAY_LEVEL.load(Ordering::Relaxed) >= 4 {
            // best-effort flush
            use std::io::Write;
            let _ = std::io::stderr().flush();
        }
    }
}

/// Returns the current notification level.
#[inline]
pub fn notification_level() -> i32 {
    DISPLAY_LEVEL.load(Ordering::Relaxed)
}

/// Sets the global notification level and returns it.
pub fn set_notification_level(level: i32) -> i32 {
    DISPLAY_LEVEL.store(level, Ordering::Relaxed);
    level
}

// ---------------------------------------------------------------------------
// Preferences
// ---------------------------------------------------------------------------

/// Tunable parameters for file compression and decompression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Prefs {
    /// Overwrite existing destination files. Default: false.
    pub overwrite: bool,
    /// Uncompressed bytes per container block. Default: `BLOCK_SIZE_DEFAULT`
    /// or `LZ77_BLOCKSIZE`.
    pub block_size: usize,
    /// Worker threads. Default: `LZ77_NBWORKERS` or auto-detected.
    pub nb_workers: usize,
    /// Keep a partially written destination after a failure. Default: false.
    pub keep_partial: bool,
    /// Match-search level. Default: `LEVEL_DEFAULT`.
    pub level: u32,
}

/// Parses a block size, returning `None` unless it is in
/// `1..=MAX_CONTAINER_BLOCK_SIZE`.
pub fn parse_block_size(value: &str) -> Option<usize> {
    match value.trim().parse::<usize>() {
        Ok(n) if (1..=MAX_CONTAINER_BLOCK_SIZE).contains(&n) => Some(n),
        _ => None,
    }
}

/// Block size from `LZ77_BLOCKSIZE`, falling back to the compiled default.
/// An invalid value is reported at level 2 and ignored.
pub fn default_block_size() -> usize {
    if let Ok(value) = std::env::var(ENV_BLOCKSIZE) {
        match parse_block_size(&value) {
            Some(n) => return n,
            None => display_level(
                2,
                &format!("Ignore environment variable setting {}={}\n", ENV_BLOCKSIZE, value),
            ),
        }
    }
    BLOCK_SIZE_DEFAULT
}

impl Default for Prefs {
    fn default() -> Self {
        Prefs {
            overwrite: false,
            block_size: default_block_size(),
            nb_workers: default_nb_workers(),
            keep_partial: false,
            level: LEVEL_DEFAULT,
        }
    }
}

impl Prefs {
    /// Creates a new `Prefs` with all defaults applied.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of worker threads, clamped to [1, NB_WORKERS_MAX].
    /// Returns the actual value stored.
    pub fn set_nb_workers(&mut self, nb_workers: usize) -> usize {
        self.nb_workers = nb_workers.clamp(1, NB_WORKERS_MAX);
        self.nb_workers
    }

    /// Sets the block size, clamped to [1, MAX_CONTAINER_BLOCK_SIZE].
    /// Returns the actual value stored.
    pub fn set_block_size(&mut self, block_size: usize) -> usize {
        self.block_size = block_size.clamp(1, MAX_CONTAINER_BLOCK_SIZE);
        self.block_size
    }

    /// Enables or disables destination-file overwrite. Returns the new value.
    pub fn set_overwrite(&mut self, yes: bool) -> bool {
        self.overwrite = yes;
        yes
    }

    /// Sets the compression level, clamped to [LEVEL_MIN, LEVEL_MAX].
    /// Returns the actual value stored.
    pub fn set_level(&mut self, level: u32) -> u32 {
        self.level = level.clamp(LEVEL_MIN, LEVEL_MAX);
        self.level
    }

    pub fn set_keep_partial(&mut self, yes: bool) -> bool {
        self.keep_partial = yes;
        yes
    }

    /// The container knobs these preferences select.
    pub fn container_options(&self) -> ContainerOptions {
        ContainerOptions::new(self.block_size, self.nb_workers).with_level(self.level)
    }
}
