//! E2E Test Suite 03: File API
//!
//! Runs the container over real files on disk, both through `LockedStream<File>`
//! providers and through the `io` layer used by the command-line tool.
//!
//! Every test works in its own temporary directory.

use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::sync::Arc;

use lz77::container::LockedStream;
use lz77::io::{
    compress_filename, decompress_filename, decompressed_filename, get_compressed_file_info, Prefs,
};
use lz77::{compress_container, decompress_buffer, decompress_container, ContainerOptions};

fn s(p: &Path) -> &str {
    p.to_str().unwrap()
}

fn log_lines(n: usize) -> Vec<u8> {
    let mut out = Vec::new();
    for i in 0..n {
        let line = format!(
            "2026-03-{:02} 12:{:02}:{:02} worker={} queue depth {} ok\n",
            i % 28 + 1,
            i % 60,
            (i * 7) % 60,
            i % 5,
            (i * 31) % 1000
        );
        out.extend_from_slice(line.as_bytes());
    }
    out
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 1: container over file handles
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_locked_file_streams_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let src_path = dir.path().join("server.log");
    let packed_path = dir.path().join("server.log.lz77");
    let out_path = dir.path().join("server.log.out");
    let original = log_lines(20_000);
    fs::write(&src_path, &original).unwrap();

    let opts = ContainerOptions::new(128 * 1024, 4);

    let source = Arc::new(LockedStream::new(File::open(&src_path).unwrap()).unwrap());
    let dst = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(true)
        .open(&packed_path)
        .unwrap();
    let sink = Arc::new(LockedStream::new(dst).unwrap());
    let summary = compress_container(source, sink, &opts).unwrap();
    assert_eq!(
        fs::metadata(&packed_path).unwrap().len(),
        summary.compressed_bytes
    );

    let source = Arc::new(LockedStream::new(File::open(&packed_path).unwrap()).unwrap());
    let sink = Arc::new(LockedStream::new(File::create(&out_path).unwrap()).unwrap());
    let back = decompress_container(source, sink, &opts).unwrap();
    assert_eq!(back.uncompressed_bytes, original.len() as u64);
    assert_eq!(fs::read(&out_path).unwrap(), original);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 2: io layer round trip
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_filename_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("data.txt");
    let packed = dir.path().join("data.txt.lz77");
    let original = log_lines(5_000);
    fs::write(&src, &original).unwrap();

    let mut prefs = Prefs::default();
    prefs.set_block_size(64 * 1024);
    prefs.set_nb_workers(3);

    let summary = compress_filename(s(&src), s(&packed), &prefs).unwrap();
    assert_eq!(summary.in_bytes, original.len() as u64);
    assert!(summary.out_bytes < summary.in_bytes);

    // The file produced on disk is an ordinary container.
    let bytes = fs::read(&packed).unwrap();
    assert_eq!(decompress_buffer(&bytes, &ContainerOptions::default()).unwrap(), original);

    let restored = decompressed_filename(s(&packed)).unwrap().to_owned();
    assert_eq!(restored, s(&src));
    fs::remove_file(&src).unwrap();
    decompress_filename(s(&packed), &restored, &prefs).unwrap();
    assert_eq!(fs::read(&src).unwrap(), original);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 3: listing agrees with the written file
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_info_matches_written_file() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("listing");
    let packed = dir.path().join("listing.lz77");
    let original = log_lines(3_000);
    fs::write(&src, &original).unwrap();

    let mut prefs = Prefs::default();
    prefs.set_block_size(16 * 1024);
    prefs.set_nb_workers(2);
    let summary = compress_filename(s(&src), s(&packed), &prefs).unwrap();

    let info = get_compressed_file_info(s(&packed)).unwrap();
    assert_eq!(info.blocks.len(), summary.blocks);
    assert_eq!(info.file_size, summary.out_bytes);
    assert_eq!(info.uncompressed_size(), original.len() as u64);
    assert!(info
        .blocks
        .iter()
        .all(|e| e.uncompressed_size as usize <= 16 * 1024));
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 4: truncated file on disk
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_truncated_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("t");
    let packed = dir.path().join("t.lz77");
    let out = dir.path().join("t.out");
    fs::write(&src, log_lines(1_000)).unwrap();
    compress_filename(s(&src), s(&packed), &Prefs::default()).unwrap();

    let len = fs::metadata(&packed).unwrap().len();
    OpenOptions::new()
        .write(true)
        .open(&packed)
        .unwrap()
        .set_len(len - 5)
        .unwrap();

    let err = decompress_filename(s(&packed), s(&out), &Prefs::default()).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    assert!(!out.exists());
}
