//! Operation mode selection and output-name resolution for the CLI.
//!
//! - [`OpMode`]: what the CLI should do with its input.
//! - [`determine_op_mode`]: infers the intended mode from a filename's extension.
//! - [`resolve_output_filename`]: derives the output path when none is given.

use anyhow::{bail, Result};

use crate::cli::constants::LZ77_EXTENSION;

/// What the CLI should do with its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpMode {
    /// Compress input into a container.
    Compress,
    /// Decompress a container.
    Decompress,
    /// Print the block index of containers.
    List,
}

/// Infer the operation mode from `filename`'s extension.
///
/// Returns [`OpMode::Decompress`] if `filename` ends with `.lz77`,
/// [`OpMode::Compress`] otherwise.
pub fn determine_op_mode(filename: &str) -> OpMode {
    if filename.ends_with(LZ77_EXTENSION) {
        OpMode::Decompress
    } else {
        OpMode::Compress
    }
}

/// Output path for `input` under `mode`.
///
/// Compression appends `.lz77`; decompression strips it and fails when the
/// input does not carry it.  List mode has no output.
pub fn resolve_output_filename(input: &str, mode: OpMode) -> Result<String> {
    match mode {
        OpMode::Compress => Ok(format!("{}{}", input, LZ77_EXTENSION)),
        OpMode::Decompress => match crate::io::decompressed_filename(input) {
            Some(base) => Ok(base.to_owned()),
            None => bail!(
                "cannot determine an output filename for {} (expected a {} suffix)",
                input,
                LZ77_EXTENSION
            ),
        },
        OpMode::List => bail!("no output file for mode {:?}", mode),
    }
}
