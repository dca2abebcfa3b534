// Tests for io/decompress.rs: decoding container files, output naming, and
// cleanup after failures.

use std::fs;
use std::path::Path;

use filetime::FileTime;
use lz77::io::{compress_filename, decompress_filename, decompressed_filename, Prefs};

fn prefs(block_size: usize, nb_workers: usize) -> Prefs {
    let mut p = Prefs::default();
    p.set_block_size(block_size);
    p.set_nb_workers(nb_workers);
    p
}

fn s(p: &Path) -> &str {
    p.to_str().unwrap()
}

fn data(len: usize) -> Vec<u8> {
    (0..len as u32).map(|i| ((i / 5) % 17 + (i % 3) * 40) as u8).collect()
}

#[test]
fn decompressed_filename_rules() {
    assert_eq!(decompressed_filename("report.pdf.lz77"), Some("report.pdf"));
    assert_eq!(decompressed_filename("dir/x.lz77"), Some("dir/x"));
    assert_eq!(decompressed_filename("report.pdf"), None);
    assert_eq!(decompressed_filename("report.LZ77"), None);
    assert_eq!(decompressed_filename(".lz77"), None);
}

#[test]
fn round_trip_across_worker_counts() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("in.bin");
    let original = data(300_001);
    fs::write(&src, &original).unwrap();

    for (i, workers) in [1usize, 2, 7].into_iter().enumerate() {
        let packed = dir.path().join(format!("in.{i}.lz77"));
        let out = dir.path().join(format!("out.{i}"));
        compress_filename(s(&src), s(&packed), &prefs(32 * 1024, workers)).unwrap();
        let summary = decompress_filename(s(&packed), s(&out), &prefs(1, workers)).unwrap();
        assert_eq!(fs::read(&out).unwrap(), original);
        assert_eq!(summary.in_bytes, fs::metadata(&packed).unwrap().len());
        assert_eq!(summary.out_bytes, original.len() as u64);
        assert_eq!(summary.blocks, 10);
    }
}

#[test]
fn mtime_is_carried_to_output() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("a");
    let packed = dir.path().join("a.lz77");
    let out = dir.path().join("a.out");
    fs::write(&src, data(10_000)).unwrap();
    let past = FileTime::from_unix_time(1_234_567_890, 0);
    filetime::set_file_mtime(&src, past).unwrap();

    compress_filename(s(&src), s(&packed), &prefs(4096, 2)).unwrap();
    let packed_mtime = FileTime::from_last_modification_time(&fs::metadata(&packed).unwrap());
    assert_eq!(packed_mtime, past);

    decompress_filename(s(&packed), s(&out), &prefs(1, 2)).unwrap();
    let out_mtime = FileTime::from_last_modification_time(&fs::metadata(&out).unwrap());
    assert_eq!(out_mtime, past);
}

#[test]
fn corrupt_block_removes_partial_output() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("c");
    let packed = dir.path().join("c.lz77");
    let out = dir.path().join("c.out");
    fs::write(&src, data(50_000)).unwrap();
    compress_filename(s(&src), s(&packed), &prefs(5_000, 1)).unwrap();

    // Damage the first block's token stream just past its size header.
    let mut bytes = fs::read(&packed).unwrap();
    bytes[12 + 3] = 0xFF;
    bytes[12 + 4] = 0xFF;
    fs::write(&packed, &bytes).unwrap();

    assert!(decompress_filename(s(&packed), s(&out), &prefs(1, 3)).is_err());
    assert!(!out.exists());
}

#[test]
fn keep_partial_leaves_output() {
    let dir = tempfile::tempdir().unwrap();
    let packed = dir.path().join("junk.lz77");
    let out = dir.path().join("junk");
    fs::write(&packed, vec![0xEEu8; 64]).unwrap();

    let mut p = prefs(1, 1);
    p.set_keep_partial(true);
    assert!(decompress_filename(s(&packed), s(&out), &p).is_err());
    assert!(out.exists());
}

#[test]
fn not_a_container_is_invalid_data() {
    let dir = tempfile::tempdir().unwrap();
    let packed = dir.path().join("short.lz77");
    let out = dir.path().join("short");
    fs::write(&packed, b"tiny").unwrap();
    let err = decompress_filename(s(&packed), s(&out), &prefs(1, 1)).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    assert!(!out.exists());
}
