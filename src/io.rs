//! File-level operations consumed by the CLI and library users.
//!
//! Everything here works on paths: opening and creating files, running a
//! container operation between them, cleaning up after failures and
//! carrying timestamps over.  The codec itself lives in [`crate::block`] and
//! [`crate::container`].

pub mod compress;
pub mod decompress;
pub mod file_info;
pub mod file_io;
pub mod prefs;

// ── Core type re-exports ─────────────────────────────────────────────────────
pub use file_info::CompressedFileInfo;
pub use file_io::FileSummary;
pub use prefs::Prefs;

// ── Notification level (global) ──────────────────────────────────────────────
pub use prefs::{notification_level, set_notification_level};

// ── Compression ──────────────────────────────────────────────────────────────
pub use compress::compress_filename;

// ── Decompression ────────────────────────────────────────────────────────────
pub use decompress::{decompress_filename, decompressed_filename};

// ── File info / --list ───────────────────────────────────────────────────────
pub use file_info::{display_compressed_files_info, get_compressed_file_info};
