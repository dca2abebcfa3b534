// Tests for cli/args.rs: turning a command line into ParsedArgs.

use clap::error::ErrorKind;
use lz77::cli::args::{display_level_for, parse_args_from, ParsedArgs};
use lz77::cli::op_mode::OpMode;

fn parse(argv: &[&str]) -> anyhow::Result<ParsedArgs> {
    parse_args_from(argv.iter().copied())
}

fn clap_kind(argv: &[&str]) -> ErrorKind {
    let err = parse(argv).unwrap_err();
    err.downcast_ref::<clap::Error>()
        .expect("a clap error")
        .kind()
}

// ─────────────────────────────────────────────────────────────────────────────
// Mode and output selection
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn plain_file_compresses_next_to_itself() {
    let p = parse(&["lz77", "data.csv"]).unwrap();
    assert_eq!(p.op_mode, OpMode::Compress);
    assert_eq!(p.input_filename, "data.csv");
    assert_eq!(p.output_filename.as_deref(), Some("data.csv.lz77"));
}

#[test]
fn lz77_file_decompresses() {
    let p = parse(&["lz77", "data.csv.lz77"]).unwrap();
    assert_eq!(p.op_mode, OpMode::Decompress);
    assert_eq!(p.output_filename.as_deref(), Some("data.csv"));
}

#[test]
fn explicit_output_wins() {
    let p = parse(&["lz77", "-d", "data.csv.lz77", "restored.csv"]).unwrap();
    assert_eq!(p.output_filename.as_deref(), Some("restored.csv"));
    let p = parse(&["lz77", "data.csv", "packed.bin"]).unwrap();
    assert_eq!(p.op_mode, OpMode::Compress);
    assert_eq!(p.output_filename.as_deref(), Some("packed.bin"));
}

#[test]
fn long_flags() {
    let p = parse(&["lz77", "--decompress", "--force", "x.lz77"]).unwrap();
    assert_eq!(p.op_mode, OpMode::Decompress);
    assert!(p.prefs.overwrite);
    let p = parse(&["lz77", "--compress", "x.lz77"]).unwrap();
    assert_eq!(p.op_mode, OpMode::Compress);
}

#[test]
fn decompress_without_suffix_needs_output() {
    assert!(parse(&["lz77", "-d", "data.csv"]).is_err());
}

#[test]
fn list_mode() {
    let p = parse(&["lz77", "--list", "data.lz77"]).unwrap();
    assert_eq!(p.op_mode, OpMode::List);
    assert!(p.output_filename.is_none());
}

#[test]
fn conflicting_modes() {
    assert_eq!(clap_kind(&["lz77", "-z", "-d", "a"]), ErrorKind::ArgumentConflict);
    assert_eq!(clap_kind(&["lz77", "-d", "-l", "a"]), ErrorKind::ArgumentConflict);
}

// ─────────────────────────────────────────────────────────────────────────────
// Tuning
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn threads_and_block_size() {
    let p = parse(&["lz77", "-T", "6", "-B", "1M", "f"]).unwrap();
    assert_eq!(p.prefs.nb_workers, 6);
    assert_eq!(p.prefs.block_size, 1 << 20);
    let o = p.prefs.container_options();
    assert_eq!((o.block_size, o.nb_workers), (1 << 20, 6));
}

#[test]
fn best_selects_deepest_search() {
    let p = parse(&["lz77", "-9", "-B", "64K", "f"]).unwrap();
    assert_eq!(p.prefs.level, 9);
    let o = p.prefs.container_options();
    assert_eq!((o.block_size, o.level), (65536, 9));
    assert_eq!(parse(&["lz77", "--level", "5", "f"]).unwrap().prefs.level, 5);
    assert_eq!(parse(&["lz77", "f"]).unwrap().prefs.level, 1);
}

#[test]
fn bad_level_values() {
    assert_eq!(clap_kind(&["lz77", "--level", "10", "f"]), ErrorKind::ValueValidation);
    assert_eq!(clap_kind(&["lz77", "--level", "x", "f"]), ErrorKind::ValueValidation);
    assert_eq!(clap_kind(&["lz77", "--best", "--level", "2", "f"]), ErrorKind::ArgumentConflict);
}

#[test]
fn bad_tuning_values() {
    assert_eq!(clap_kind(&["lz77", "-T", "999", "f"]), ErrorKind::ValueValidation);
    assert_eq!(clap_kind(&["lz77", "-B", "0", "f"]), ErrorKind::ValueValidation);
    assert_eq!(clap_kind(&["lz77", "-B", "20M", "f"]), ErrorKind::ValueValidation);
}

#[test]
fn missing_input() {
    assert_eq!(clap_kind(&["lz77"]), ErrorKind::MissingRequiredArgument);
}

#[test]
fn unknown_flag() {
    assert_eq!(clap_kind(&["lz77", "--frobnicate", "f"]), ErrorKind::UnknownArgument);
}

// ─────────────────────────────────────────────────────────────────────────────
// Verbosity
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn verbosity_is_reported_not_applied() {
    assert_eq!(parse(&["lz77", "f"]).unwrap().display_level, 2);
    assert_eq!(parse(&["lz77", "-v", "f"]).unwrap().display_level, 3);
    assert_eq!(parse(&["lz77", "-qq", "f"]).unwrap().display_level, 0);
    assert_eq!(parse(&["lz77", "-q", "-q", "-q", "f"]).unwrap().display_level, 0);
}

#[test]
fn display_level_arithmetic() {
    assert_eq!(display_level_for(0, 0), 2);
    assert_eq!(display_level_for(3, 0), 5);
    assert_eq!(display_level_for(1, 2), 1);
}

#[test]
fn help_and_version() {
    assert_eq!(clap_kind(&["lz77", "--help"]), ErrorKind::DisplayHelp);
    assert_eq!(clap_kind(&["lz77", "--version"]), ErrorKind::DisplayVersion);
}
