//! Command-line argument parsing for the `lz77` binary.
//!
//! [`Args`] is the clap definition.  [`parse_args_from`] turns an explicit
//! argument list into a [`ParsedArgs`], folding `-f`, `-T`, `-B` and the
//! level flags into [`Prefs`] and `-q`/`-v` into a display level the caller applies.  Bad or
//! unrecognised options come back as an `Err`; `--help` and `--version`
//! come back as a clap error of the matching kind, which the caller prints.

use anyhow::{bail, Result};
use clap::{ArgAction, Parser};

use crate::block::LEVEL_MAX;
use crate::cli::arg_utils::{parse_block_size_arg, parse_level_arg, parse_workers_arg};
use crate::cli::constants::DISPLAY_LEVEL_DEFAULT;
use crate::cli::op_mode::{determine_op_mode, resolve_output_filename, OpMode};
use crate::io::prefs::Prefs;

/// LZ77 block-parallel file compressor.
#[derive(Parser, Debug)]
#[command(
    name = "lz77",
    version,
    about = "LZ77 block-parallel file compressor",
    long_about = None
)]
pub struct Args {
    /// File to process
    #[arg(value_name = "FILE")]
    pub input: String,

    /// Output file (default: FILE.lz77, or FILE without .lz77 when decompressing)
    #[arg(value_name = "OUTPUT")]
    pub output: Option<String>,

    /// Compress (default unless FILE ends in .lz77)
    #[arg(short = 'z', long = "compress", conflicts_with_all = ["decompress", "list"])]
    pub compress: bool,

    /// Decompress
    #[arg(short = 'd', long = "decompress", conflicts_with = "list")]
    pub decompress: bool,

    /// List the blocks of a compressed file
    #[arg(short = 'l', long = "list")]
    pub list: bool,

    /// Overwrite an existing output file
    #[arg(short = 'f', long = "force")]
    pub force: bool,

    /// Worker threads (0 = auto)
    #[arg(short = 'T', long = "threads", value_name = "N", value_parser = parse_workers_arg)]
    pub threads: Option<usize>,

    /// Uncompressed bytes per block (accepts K and M suffixes)
    #[arg(short = 'B', long = "block-size", value_name = "BYTES", value_parser = parse_block_size_arg)]
    pub block_size: Option<usize>,

    /// Deepest match search (same as --level 9)
    #[arg(short = '9', long = "best", conflicts_with = "level")]
    pub best: bool,

    /// Match-search level, 1 (fastest, default) to 9 (smallest output)
    #[arg(long = "level", value_name = "N", value_parser = parse_level_arg)]
    pub level: Option<u32>,

    /// Suppress messages (repeat for errors too)
    #[arg(short = 'q', long = "quiet", action = ArgAction::Count)]
    pub quiet: u8,

    /// More messages (repeatable)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,
}

/// Everything the dispatch phase needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedArgs {
    pub prefs: Prefs,
    /// Settled here, from the flags or else the input's extension.
    pub op_mode: OpMode,
    pub input_filename: String,
    /// `None` only in list mode.
    pub output_filename: Option<String>,
    /// Level selected by `-v` / `-q`; not yet applied to the global.
    pub display_level: u32,
}

/// Parse `std::env::args()`.
pub fn parse_args() -> Result<ParsedArgs> {
    parse_args_from(std::env::args())
}

/// Parse an explicit argument list, `argv[0]` included.
pub fn parse_args_from<I, T>(argv: I) -> Result<ParsedArgs>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let args = Args::try_parse_from(argv)?;
    resolve(args)
}

/// Display level selected by `-v` / `-q` counts.
pub fn display_level_for(verbose: u8, quiet: u8) -> u32 {
    (DISPLAY_LEVEL_DEFAULT + verbose as u32).saturating_sub(quiet as u32)
}

/// Turns clap's view of the command line into runtime options.
pub fn resolve(args: Args) -> Result<ParsedArgs> {
    let mut prefs = Prefs::default();
    prefs.set_overwrite(args.force);
    if let Some(n) = args.threads.filter(|&n| n > 0) {
        prefs.set_nb_workers(n);
    }
    if let Some(bs) = args.block_size {
        prefs.set_block_size(bs);
    }
    if args.best {
        prefs.set_level(LEVEL_MAX);
    } else if let Some(level) = args.level {
        prefs.set_level(level);
    }

    let op_mode = if args.list {
        OpMode::List
    } else if args.decompress {
        OpMode::Decompress
    } else if args.compress {
        OpMode::Compress
    } else {
        determine_op_mode(&args.input)
    };

    let output_filename = match (op_mode, args.output) {
        (OpMode::List, Some(_)) => bail!("--list takes no output file"),
        (OpMode::List, None) => None,
        (_, Some(out)) => Some(out),
        (mode, None) => Some(resolve_output_filename(&args.input, mode)?),
    };

    Ok(ParsedArgs {
        prefs,
        op_mode,
        input_filename: args.input,
        output_filename,
        display_level: display_level_for(args.verbose, args.quiet),
    })
}
