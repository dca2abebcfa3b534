// cli/constants.rs: program identity and the display macros used by the
// command-line front end.

pub use crate::config::LZ77_EXTENSION;
use crate::io::prefs::{notification_level, set_notification_level};

// ── String / identity constants ──────────────────────────────────────────────
pub const COMPRESSOR_NAME: &str = "lz77";

// ── Display level ────────────────────────────────────────────────────────────
//
// The CLI shares the notification level of `crate::io::prefs`, so `-q` / `-v`
// affect library diagnostics too.
//
// 0 = no output; 1 = errors only; 2 = normal (downgradable); 3 = non-downgradable; 4 = verbose

/// Default display level before any `-q` / `-v`.
pub const DISPLAY_LEVEL_DEFAULT: u32 = 2;

/// Returns the current display level.
#[inline]
pub fn display_level() -> u32 {
    notification_level().max(0) as u32
}

/// Sets the display level.
#[inline]
pub fn set_display_level(level: u32) {
    set_notification_level(level.min(i32::MAX as u32) as i32);
}

// ── Display helpers ──────────────────────────────────────────────────────────

/// Print to stdout.
#[macro_export]
macro_rules! displayout {
    ($($arg:tt)*) => { print!($($arg)*) };
}

/// Conditionally print to stderr at or above `level`.
#[macro_export]
macro_rules! displaylevel {
    ($level:expr, $($arg:tt)*) => {
        if $crate::cli::constants::display_level() >= $level {
            eprint!($($arg)*);
        }
    };
}
