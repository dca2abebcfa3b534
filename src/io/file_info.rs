//! File information display for the `--list` flag.
//!
//! Reads only the header and index of each container, never the block
//! payloads, and prints one summary row per file: block count, compressed
//! and uncompressed sizes, and ratio.  At notification level 3 and above a
//! per-block table is printed as well.
//!
//! Entry point: [`display_compressed_files_info`].

use std::fs::File;
use std::io;
use std::path::Path;

use crate::container::{read_index, BlockSource, IndexEntry, LockedStream};
use crate::io::prefs::{display_level, notification_level};
use crate::util::{format_size, is_reg_file, ratio_percent};

// ---------------------------------------------------------------------------
// CompressedFileInfo
// ---------------------------------------------------------------------------

/// What the index of one container file says about it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompressedFileInfo {
    pub file_name: String,
    pub file_size: u64,
    /// Index entries sorted by `order`.
    pub blocks: Vec<IndexEntry>,
}

impl CompressedFileInfo {
    pub fn uncompressed_size(&self) -> u64 {
        self.blocks.iter().map(|e| e.uncompressed_size as u64).sum()
    }
}

fn base_name(path: &str) -> &str {
    Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(path)
}

/// Reads and validates the index of the container at `path`.
pub fn get_compressed_file_info(path: &str) -> io::Result<CompressedFileInfo> {
    let stream = LockedStream::new(File::open(path)?)?;
    let file_size = stream.size();
    let blocks = read_index(&stream)?;
    Ok(CompressedFileInfo {
        file_name: base_name(path).to_owned(),
        file_size,
        blocks,
    })
}

// ---------------------------------------------------------------------------
// display_compressed_files_info
// ---------------------------------------------------------------------------

/// Prints a compressed-file summary table for the `--list` flag.
///
/// Returns `Ok(())` if every file was listed, or the first `Err` encountered
/// (not a regular file, or not a valid container).
pub fn display_compressed_files_info(paths: &[&str]) -> io::Result<()> {
    let verbose = notification_level() >= 3;

    println!(
        "{:>8} {:>13} {:>13} {:>8}   {}",
        "Blocks", "Compressed", "Uncompressed", "Ratio", "Filename"
    );

    for &path in paths {
        if !is_reg_file(Path::new(path)) {
            display_level(1, &format!("lz77: {} is not a regular file\n", path));
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is not a regular file", path),
            ));
        }

        let info = get_compressed_file_info(path).map_err(|e| {
            display_level(1, &format!("lz77: {}: File format not recognized ({})\n", path, e));
            e
        })?;

        let uncompressed = info.uncompressed_size();
        println!(
            "{:>8} {:>13} {:>13} {:>7.2}%   {}",
            info.blocks.len(),
            format_size(info.file_size),
            format_size(uncompressed),
            ratio_percent(info.file_size, uncompressed),
            info.file_name
        );

        if verbose {
            println!(
                "    {:>8} {:>16} {:>12} {:>12}",
                "Order", "Location", "Compressed", "Uncompressed"
            );
            for e in &info.blocks {
                println!(
                    "    {:>8} {:>16} {:>12} {:>12}",
                    e.order, e.location, e.compressed_size, e.uncompressed_size
                );
            }
        }
    }

    Ok(())
}
