// arg_utils.rs: small parsers used as clap value parsers.

use crate::block::{LEVEL_MAX, LEVEL_MIN};
use crate::config::{KB, MB, NB_WORKERS_MAX};
use crate::container::MAX_CONTAINER_BLOCK_SIZE;

/// Parses an unsigned integer from the start of `s`, optionally followed by a
/// size suffix.  Returns `None` if no leading digits are present or the value
/// overflows, or `Some((value, remainder))` where `remainder` is the part of
/// `s` that was not consumed.
///
/// Recognised suffixes (case-sensitive):
///   `K` / `KB` / `KiB`  → multiply by 1 024
///   `M` / `MB` / `MiB`  → multiply by 1 048 576
pub fn read_u64_from_str(s: &str) -> Option<(u64, &str)> {
    let bytes = s.as_bytes();
    let digits = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }

    let mut result: u64 = 0;
    for &b in &bytes[..digits] {
        result = result.checked_mul(10)?.checked_add((b - b'0') as u64)?;
    }

    let mut i = digits;
    let multiplier = match bytes.get(i) {
        Some(b'K') => KB as u64,
        Some(b'M') => MB as u64,
        _ => 1,
    };
    if multiplier > 1 {
        result = result.checked_mul(multiplier)?;
        i += 1;
        if bytes.get(i) == Some(&b'i') {
            i += 1;
        }
        if bytes.get(i) == Some(&b'B') {
            i += 1;
        }
    }

    Some((result, &s[i..]))
}

/// clap value parser for `-B`: a block size in `1..=MAX_CONTAINER_BLOCK_SIZE`,
/// with optional `K` / `M` suffix.
pub fn parse_block_size_arg(s: &str) -> Result<usize, String> {
    match read_u64_from_str(s) {
        Some((n, "")) if n >= 1 && n <= MAX_CONTAINER_BLOCK_SIZE as u64 => Ok(n as usize),
        Some((_, "")) => Err(format!(
            "block size must be between 1 and {} bytes",
            MAX_CONTAINER_BLOCK_SIZE
        )),
        _ => Err(format!("invalid block size '{}'", s)),
    }
}

/// clap value parser for `--level`: `LEVEL_MIN..=LEVEL_MAX`, no suffix.
pub fn parse_level_arg(s: &str) -> Result<u32, String> {
    match s.parse::<u32>() {
        Ok(n) if (LEVEL_MIN..=LEVEL_MAX).contains(&n) => Ok(n),
        _ => Err(format!(
            "invalid level '{}' (must be {}..={})",
            s, LEVEL_MIN, LEVEL_MAX
        )),
    }
}

/// clap value parser for `-T`: `0` (auto) up to `NB_WORKERS_MAX`.
pub fn parse_workers_arg(s: &str) -> Result<usize, String> {
    match read_u64_from_str(s) {
        Some((n, "")) if n <= NB_WORKERS_MAX as u64 => Ok(n as usize),
        Some((_, "")) => Err(format!("at most {} threads are supported", NB_WORKERS_MAX)),
        _ => Err(format!("invalid thread count '{}'", s)),
    }
}
