//! Binary entry point for the `lz77` command-line tool.
//!
//! # Control flow
//!
//! 1. [`parse_args`] processes all flags and builds a [`ParsedArgs`] value.
//! 2. The selected display level is applied globally.
//! 3. [`run`] dispatches to the appropriate I/O operation.
//! 4. Any error is printed once and turned into exit code 1.

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::CommandFactory;

use lz77::cli::args::{parse_args, Args, ParsedArgs};
use lz77::cli::constants::{display_level, set_display_level, COMPRESSOR_NAME};
use lz77::cli::op_mode::OpMode;
use lz77::config::KB;
use lz77::io::{compress_filename, decompress_filename, display_compressed_files_info};
use lz77::util::format_size;

// ── Dispatch ─────────────────────────────────────────────────────────────────

/// Execute the operation selected by argument parsing.
fn run(args: ParsedArgs) -> Result<()> {
    lz77::displaylevel!(
        3,
        "*** {} v{} {}-bit ***\n",
        COMPRESSOR_NAME,
        lz77::LZ77_VERSION_STRING,
        std::mem::size_of::<*const ()>() * 8
    );

    let ParsedArgs {
        prefs,
        op_mode,
        input_filename,
        output_filename,
        ..
    } = args;

    lz77::displaylevel!(
        4,
        "Using {} worker threads, {} byte blocks, level {}\n",
        prefs.nb_workers,
        prefs.block_size,
        prefs.level
    );

    if op_mode == OpMode::List {
        display_compressed_files_info(&[input_filename.as_str()])
            .with_context(|| format!("cannot list {}", input_filename))?;
        return Ok(());
    }

    let output_filename =
        output_filename.context("internal error: no output filename resolved")?;
    match op_mode {
        OpMode::Decompress => lz77::displaylevel!(3, "Decoding file {} \n", output_filename),
        _ => lz77::displaylevel!(3, "Compressed filename will be : {} \n", output_filename),
    }

    let summary = match op_mode {
        OpMode::Decompress => decompress_filename(&input_filename, &output_filename, &prefs)
            .with_context(|| format!("cannot decompress {}", input_filename))?,
        _ => {
            lz77::displaylevel!(4, "Blocks size : {} KB\n", prefs.block_size / KB);
            compress_filename(&input_filename, &output_filename, &prefs)
                .with_context(|| format!("cannot compress {}", input_filename))?
        }
    };

    if display_level() >= 2 {
        lz77::displayout!(
            "{} {} -> {}\n",
            input_filename,
            format_size(summary.in_bytes),
            format_size(summary.out_bytes)
        );
    }
    Ok(())
}

// ── Entry point ──────────────────────────────────────────────────────────────

fn main() -> ExitCode {
    // `lz77 help` prints usage, unless a file really is called "help".
    let argv: Vec<String> = std::env::args().collect();
    if argv.len() == 2 && argv[1] == "help" && !Path::new("help").exists() {
        let _ = Args::command().print_help();
        return ExitCode::SUCCESS;
    }

    let args = match parse_args() {
        Ok(a) => a,
        Err(e) => {
            // --help / --version land here as clap "errors" with exit code 0.
            if let Some(clap_err) = e.downcast_ref::<clap::Error>() {
                clap_err.exit();
            }
            eprintln!("{}: {:#}", COMPRESSOR_NAME, e);
            return ExitCode::FAILURE;
        }
    };

    set_display_level(args.display_level);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if display_level() >= 1 {
                eprintln!("{}: {:#}", COMPRESSOR_NAME, e);
            }
            ExitCode::FAILURE
        }
    }
}
