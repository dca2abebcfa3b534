//! Utility module.
//!
//! - [`cores`]      : CPU core counting and the default worker count
//! - [`file_status`]: regular-file / directory checks, sizes, mtime copy

pub mod cores;
pub mod file_status;

// ── Re-exports at `util::` level ─────────────────────────────────────────────

pub use cores::{count_cores, default_nb_workers, parse_nb_workers};

pub use file_status::{copy_mtime, get_file_size, is_directory, is_reg_file};

use crate::config::{KB, MB};

// ── Size formatting ───────────────────────────────────────────────────────────

/// Formats a byte count for the one-line result summary.
///
/// Sizes below 1000 KB print in KB, larger ones in MB, both with two
/// decimals.  KB and MB are 1024 and 1024² bytes.
pub fn format_size(bytes: u64) -> String {
    let kb = bytes as f64 / KB as f64;
    if kb < 1000.0 {
        format!("{:.2} KB", kb)
    } else {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    }
}

/// Compressed-to-original size ratio in percent; 0 for empty input.
pub fn ratio_percent(compressed: u64, original: u64) -> f64 {
    if original == 0 {
        0.0
    } else {
        compressed as f64 / original as f64 * 100.0
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
