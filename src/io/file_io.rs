//! File I/O primitives shared by compression and decompression.
//!
//! - [`open_src_file`] opens a regular file for reading and rejects
//!   directories.
//! - [`open_dst_file`] creates the destination, enforcing the overwrite
//!   policy from [`Prefs`].
//! - [`process_file`] runs one container operation between two paths and
//!   removes the destination again if anything fails.
//!
//! Diagnostics go to stderr, gated by the global notification level.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use crate::container::{ContainerError, ContainerOptions, ContainerSummary, LockedStream};
use crate::io::prefs::{display_level, Prefs};
use crate::util::{copy_mtime, is_directory};

/// A file behind the mutex the container workers share.
pub type SharedFile = Arc<LockedStream<File>>;

// ---------------------------------------------------------------------------
// Source file
// ---------------------------------------------------------------------------

/// Opens `path` for reading.
///
/// A directory is refused with [`io::ErrorKind::InvalidInput`].
pub fn open_src_file(path: &str) -> io::Result<File> {
    if is_directory(Path::new(path)) {
        display_level(1, &format!("lz77: {} is a directory -- ignored\n", path));
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{}: is a directory", path),
        ));
    }

    File::open(path).map_err(|e| {
        display_level(1, &format!("{}: {}\n", path, e));
        e
    })
}

// ---------------------------------------------------------------------------
// Destination file
// ---------------------------------------------------------------------------

/// Creates (or truncates) `path` for writing.
///
/// When `prefs.overwrite` is false and the file already exists, returns an
/// [`io::ErrorKind::AlreadyExists`] error without touching it.
pub fn open_dst_file(path: &str, prefs: &Prefs) -> io::Result<File> {
    let p = Path::new(path);
    if is_directory(p) {
        display_level(1, &format!("lz77: {} is a directory\n", path));
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{}: is a directory", path),
        ));
    }

    if !prefs.overwrite && p.exists() {
        display_level(1, &format!("{} already exists; not overwritten\n", path));
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{}: already exists; not overwritten", path),
        ));
    }

    OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .map_err(|e| {
            display_level(1, &format!("{}: {}\n", path, e));
            e
        })
}

/// Deletes a partially written destination.  Errors are ignored.
pub fn remove_partial(path: &str) {
    if fs::remove_file(path).is_ok() {
        display_level(3, &format!("Removed partial output {}\n", path));
    }
}

fn same_file(a: &str, b: &str) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

// ---------------------------------------------------------------------------
// One file in, one file out
// ---------------------------------------------------------------------------

/// Statistics returned from a successful file operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileSummary {
    /// Bytes read from the source file.
    pub in_bytes: u64,
    /// Bytes written to the destination file.
    pub out_bytes: u64,
    pub blocks: usize,
}

/// Runs `op` from `src` to `dst`.
///
/// On failure the destination is removed unless `prefs.keep_partial` is set.
/// On success the source mtime is copied onto the destination.  `forward`
/// says which direction `op` goes, so the summary reports sizes as seen from
/// the files rather than from the container.
pub(crate) fn process_file<F>(
    src: &str,
    dst: &str,
    prefs: &Prefs,
    forward: bool,
    op: F,
) -> io::Result<FileSummary>
where
    F: FnOnce(SharedFile, SharedFile, &ContainerOptions) -> Result<ContainerSummary, ContainerError>,
{
    if same_file(src, dst) {
        display_level(1, &format!("lz77: {}: source and destination are the same file\n", src));
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{}: source and destination are the same file", src),
        ));
    }

    let started = Instant::now();
    let source = Arc::new(LockedStream::new(open_src_file(src)?)?);
    let dst_file = open_dst_file(dst, prefs)?;

    let result = LockedStream::new(dst_file)
        .map_err(ContainerError::from)
        .and_then(|sink| op(source, Arc::new(sink), &prefs.container_options()));

    let summary = match result {
        Ok(s) => s,
        Err(e) => {
            display_level(1, &format!("lz77: {}: {}\n", src, e));
            if !prefs.keep_partial {
                remove_partial(dst);
            }
            return Err(e.into());
        }
    };

    if let Err(e) = copy_mtime(Path::new(src), Path::new(dst)) {
        display_level(2, &format!("Warning : cannot set timestamp of {}: {}\n", dst, e));
    }

    let (in_bytes, out_bytes) = if forward {
        (summary.uncompressed_bytes, summary.compressed_bytes)
    } else {
        (summary.compressed_bytes, summary.uncompressed_bytes)
    };

    let seconds = started.elapsed().as_secs_f64().max(1e-9);
    display_level(
        3,
        &format!(
            "Done in {:.2} s ==> {:.2} MiB/s\n",
            seconds,
            summary.uncompressed_bytes as f64 / seconds / 1024.0 / 1024.0
        ),
    );

    Ok(FileSummary {
        in_bytes,
        out_bytes,
        blocks: summary.blocks,
    })
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
