// e2e/cli_integration.rs: CLI integration tests (Suite 05)
//
// Tests the `lz77` binary as a black-box CLI tool using std::process::Command.
// Covers argument parsing, compress/decompress dispatch, exit codes, the
// overwrite policy, worker, block-size and level flags, and list mode.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Locate the `lz77` binary produced by Cargo.
fn lz77_bin() -> PathBuf {
    // CARGO_BIN_EXE_lz77 is set by Cargo when building integration tests.
    if let Some(p) = option_env!("CARGO_BIN_EXE_lz77") {
        return PathBuf::from(p);
    }
    let mut p = std::env::current_exe().unwrap();
    p.pop(); // test binary filename
    if p.ends_with("deps") {
        p.pop();
    }
    p.push("lz77");
    p
}

fn run(dir: &Path, args: &[&str]) -> Output {
    Command::new(lz77_bin())
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to run lz77")
}

/// Create a TempDir containing a text file with ~60 KB of content.
fn make_temp_input() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let input_path = dir.path().join("input.txt");
    let mut content = String::new();
    for i in 0..2_000 {
        content.push_str(&format!("line {} of the sample input, value={}\n", i, i * i % 977));
    }
    fs::write(&input_path, content).unwrap();
    (dir, input_path)
}

// ── 1. Compress / decompress roundtrip ───────────────────────────────────────

#[test]
fn test_cli_compress_decompress_roundtrip() {
    let (dir, input) = make_temp_input();
    let original = fs::read(&input).unwrap();

    let out = run(dir.path(), &["input.txt", "packed.bin"]);
    assert!(out.status.success(), "compress should exit 0: {:?}", out);
    let packed = dir.path().join("packed.bin");
    assert!(fs::metadata(&packed).unwrap().len() < original.len() as u64);

    let out = run(dir.path(), &["-d", "packed.bin", "restored.txt"]);
    assert!(out.status.success(), "decompress should exit 0: {:?}", out);
    assert_eq!(fs::read(dir.path().join("restored.txt")).unwrap(), original);
}

// ── 2. Default output names ──────────────────────────────────────────────────

#[test]
fn test_cli_default_names_and_auto_decompress() {
    let (dir, input) = make_temp_input();
    let original = fs::read(&input).unwrap();

    let out = run(dir.path(), &["input.txt"]);
    assert!(out.status.success());
    assert!(dir.path().join("input.txt.lz77").exists());

    // A `.lz77` argument selects decompression without `-d`.
    fs::remove_file(&input).unwrap();
    let out = run(dir.path(), &["input.txt.lz77"]);
    assert!(out.status.success(), "{:?}", out);
    assert_eq!(fs::read(&input).unwrap(), original);
}

// ── 3. Overwrite policy ──────────────────────────────────────────────────────

#[test]
fn test_cli_refuses_overwrite_without_force() {
    let (dir, _input) = make_temp_input();
    let target = dir.path().join("input.txt.lz77");
    fs::write(&target, b"keep me").unwrap();

    let out = run(dir.path(), &["input.txt"]);
    assert!(!out.status.success());
    assert_eq!(fs::read(&target).unwrap(), b"keep me");

    let out = run(dir.path(), &["-f", "input.txt"]);
    assert!(out.status.success(), "{:?}", out);
    assert_ne!(fs::read(&target).unwrap(), b"keep me");
}

// ── 4. Threads and block size ────────────────────────────────────────────────

#[test]
fn test_cli_threads_and_block_size() {
    let (dir, input) = make_temp_input();
    let original = fs::read(&input).unwrap();

    let out = run(dir.path(), &["-T", "4", "-B", "4K", "input.txt", "small.lz77"]);
    assert!(out.status.success(), "{:?}", out);

    let bytes = fs::read(dir.path().join("small.lz77")).unwrap();
    let count = u32::from_le_bytes(bytes[8..12].try_into().unwrap()) as usize;
    assert_eq!(count, original.len().div_ceil(4096));

    let out = run(dir.path(), &["-T", "1", "-d", "small.lz77", "back.txt"]);
    assert!(out.status.success());
    assert_eq!(fs::read(dir.path().join("back.txt")).unwrap(), original);
}

#[test]
fn test_cli_best_level_roundtrip() {
    let (dir, input) = make_temp_input();
    let original = fs::read(&input).unwrap();

    assert!(run(dir.path(), &["input.txt", "fast.lz77"]).status.success());
    let out = run(dir.path(), &["-9", "input.txt", "best.lz77"]);
    assert!(out.status.success(), "{:?}", out);
    let fast = fs::metadata(dir.path().join("fast.lz77")).unwrap().len();
    let best = fs::metadata(dir.path().join("best.lz77")).unwrap().len();
    assert!(best < fast, "{best} vs {fast}");

    // No level flag is needed to read it back.
    let out = run(dir.path(), &["-d", "best.lz77", "back.txt"]);
    assert!(out.status.success(), "{:?}", out);
    assert_eq!(fs::read(dir.path().join("back.txt")).unwrap(), original);

    let out = run(dir.path(), &["--level", "12", "input.txt", "bad.lz77"]);
    assert!(!out.status.success());
}

#[test]
fn test_cli_rejects_bad_numbers() {
    let (dir, _input) = make_temp_input();
    for args in [
        &["-T", "many", "input.txt"][..],
        &["-B", "0", "input.txt"][..],
        &["-B", "1G", "input.txt"][..],
    ] {
        let out = run(dir.path(), args);
        assert!(!out.status.success(), "{:?} should fail", args);
    }
    assert!(!dir.path().join("input.txt.lz77").exists());
}

// ── 5. List mode ─────────────────────────────────────────────────────────────

#[test]
fn test_cli_list_mode() {
    let (dir, _input) = make_temp_input();
    assert!(run(dir.path(), &["-B", "16K", "input.txt"]).status.success());

    let out = run(dir.path(), &["-l", "input.txt.lz77"]);
    assert!(out.status.success(), "{:?}", out);
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Blocks"), "{stdout}");
    assert!(stdout.contains("input.txt.lz77"), "{stdout}");

    let out = run(dir.path(), &["-l", "input.txt"]);
    assert!(!out.status.success());
}

// ── 6. Corrupt input ─────────────────────────────────────────────────────────

#[test]
fn test_cli_corrupt_input_exits_nonzero() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("junk.lz77"), vec![0xA5u8; 200]).unwrap();

    let out = run(dir.path(), &["junk.lz77"]);
    assert!(!out.status.success());
    assert!(!out.stderr.is_empty());
    assert!(!dir.path().join("junk").exists());
}

#[test]
fn test_cli_missing_input() {
    let dir = TempDir::new().unwrap();
    let out = run(dir.path(), &["absent.txt"]);
    assert!(!out.status.success());
    assert!(!dir.path().join("absent.txt.lz77").exists());
}

// ── 7. Help and version ──────────────────────────────────────────────────────

#[test]
fn test_cli_version_and_help() {
    let dir = TempDir::new().unwrap();

    let out = run(dir.path(), &["--version"]);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains(env!("CARGO_PKG_VERSION")));

    let out = run(dir.path(), &["--help"]);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("Usage"));

    let out = run(dir.path(), &["help"]);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("Usage"));
}

#[test]
fn test_cli_no_arguments_fails() {
    let dir = TempDir::new().unwrap();
    let out = run(dir.path(), &[]);
    assert!(!out.status.success());
}

// ── 8. Quiet mode ────────────────────────────────────────────────────────────

#[test]
fn test_cli_quiet_suppresses_summary() {
    let (dir, _input) = make_temp_input();
    let out = run(dir.path(), &["-q", "input.txt"]);
    assert!(out.status.success());
    assert!(out.stdout.is_empty());

    let out = run(dir.path(), &["-f", "input.txt"]);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("input.txt"));
}

#[test]
fn test_cli_verbose_reports_output_name() {
    let (dir, _input) = make_temp_input();
    let out = run(dir.path(), &["input.txt"]);
    assert!(out.status.success());
    assert!(!String::from_utf8_lossy(&out.stderr).contains("Compressed filename"));

    let out = run(dir.path(), &["-v", "-f", "input.txt"]);
    assert!(out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert_eq!(
        stderr.matches("Compressed filename will be : input.txt.lz77").count(),
        1,
        "{stderr}"
    );
}
