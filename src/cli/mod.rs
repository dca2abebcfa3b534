//! Command-line interface for the `lz77` binary.
//!
//! | Submodule     | Responsibility |
//! |---------------|---------------|
//! | [`constants`] | Program identity, size multipliers, display level accessors and the `display*!` macros. |
//! | [`arg_utils`] | Size-suffix number parsing and the clap value parsers for `-B` / `-T`. |
//! | [`op_mode`]   | `OpMode` enum, extension-based mode inference, output filename derivation. |
//! | [`args`]      | clap definition and `ParsedArgs`, the settled runtime options. |
//!
//! Typical call sequence: `parse_args` → dispatch to the I/O layer.

pub mod constants;
pub mod arg_utils;
pub mod op_mode;
pub mod args;
