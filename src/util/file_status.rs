//! File status helpers.
//!
//! Thin wrappers over `std::fs::metadata` plus the `filetime` crate for
//! carrying modification times from a source file to the file produced
//! from it.

use std::fs;
use std::io;
use std::path::Path;
use std::time::SystemTime;

use filetime::FileTime;

/// Returns `true` if `path` exists and is a regular file (symlinks followed).
pub fn is_reg_file(path: &Path) -> bool {
    fs::metadata(path).map(|m| m.is_file()).unwrap_or(false)
}

/// Returns `true` if `path` exists and is a directory (symlinks followed).
pub fn is_directory(path: &Path) -> bool {
    fs::metadata(path).map(|m| m.is_dir()).unwrap_or(false)
}

/// Size of the file at `path` in bytes, or 0 if it cannot be stat'ed.
pub fn get_file_size(path: &Path) -> u64 {
    fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

/// Copies the modification time of `src` onto `dst` and sets the access
/// time of `dst` to now.
///
/// Returns `Err` if `dst` is not a regular file.
pub fn copy_mtime(src: &Path, dst: &Path) -> io::Result<()> {
    if !is_reg_file(dst) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "copy_mtime: destination is not a regular file",
        ));
    }
    let meta = fs::metadata(src)?;
    let mtime = FileTime::from_last_modification_time(&meta);
    let atime = FileTime::from_system_time(SystemTime::now());
    filetime::set_file_times(dst, atime, mtime)
}
