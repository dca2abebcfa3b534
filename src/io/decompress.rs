//! File decompression.

use std::io;

use crate::config::LZ77_EXTENSION;
use crate::container::decompress_container;
use crate::io::file_io::{process_file, FileSummary};
use crate::io::prefs::{display_level, Prefs};

/// Decompresses the container file `src` into `dst`.
///
/// `dst` must not exist unless `prefs.overwrite` is set.  If any block fails
/// to decode the partially written `dst` is removed.
pub fn decompress_filename(src: &str, dst: &str, prefs: &Prefs) -> io::Result<FileSummary> {
    display_level(4, &format!("Decoding {} into {}\n", src, dst));
    process_file(src, dst, prefs, false, |source, sink, opts| {
        decompress_container(source, sink, opts)
    })
}

/// Output name for decompressing `src`: the name with its `.lz77` suffix
/// stripped, or `None` when there is no such suffix to strip.
pub fn decompressed_filename(src: &str) -> Option<&str> {
    src.strip_suffix(LZ77_EXTENSION).filter(|base| !base.is_empty())
}
