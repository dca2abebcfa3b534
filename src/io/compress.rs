//! File compression.

use std::io;

use crate::config::KB;
use crate::container::compress_container;
use crate::io::file_io::{process_file, FileSummary};
use crate::io::prefs::{display_level, Prefs};

/// Compresses `src` into a new container file at `dst`.
///
/// `dst` must not exist unless `prefs.overwrite` is set.  If compression
/// fails the partially written `dst` is removed.
pub fn compress_filename(src: &str, dst: &str, prefs: &Prefs) -> io::Result<FileSummary> {
    display_level(
        4,
        &format!(
            "Compressing {} with {} KB blocks, {} workers, level {}\n",
            src,
            prefs.block_size / KB,
            prefs.nb_workers,
            prefs.level
        ),
    );
    process_file(src, dst, prefs, true, |source, sink, opts| {
        compress_container(source, sink, opts)
    })
}
