use crate::config::{ENV_NBWORKERS, NB_WORKERS_DEFAULT, NB_WORKERS_MAX};
use crate::io::prefs::display_level;

/// Returns the number of logical CPU cores available on the system.
///
/// Guaranteed to return a value ≥ 1 (falls back to 1 on error).
pub fn count_cores() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Worker count derived from the machine alone: physical cores, minus one
/// core plus one per eight left for the rest of the system.
pub fn auto_nb_workers() -> usize {
    let nb_cores = num_cpus::get_physical();
    let spared = 1 + (nb_cores >> 3);
    if nb_cores <= spared {
        1
    } else {
        nb_cores - spared
    }
}

/// Parses a worker count, returning `None` for anything that is not a
/// positive integer.
pub fn parse_nb_workers(value: &str) -> Option<usize> {
    match value.trim().parse::<usize>() {
        Ok(0) | Err(_) => None,
        Ok(n) => Some(n.min(NB_WORKERS_MAX)),
    }
}

/// Default number of worker threads.
///
/// Honors `LZ77_NBWORKERS` when it holds a positive integer; an invalid value
/// is reported at level 2 and ignored.  The result is always in
/// `1..=NB_WORKERS_MAX`.
pub fn default_nb_workers() -> usize {
    if let Ok(value) = std::env::var(ENV_NBWORKERS) {
        match parse_nb_workers(&value) {
            Some(n) => return n,
            None => display_level(
                2,
                &format!("Ignore environment variable setting {}={}\n", ENV_NBWORKERS, value),
            ),
        }
    }
    let n = if NB_WORKERS_DEFAULT > 0 {
        NB_WORKERS_DEFAULT
    } else {
        auto_nb_workers()
    };
    n.clamp(1, NB_WORKERS_MAX)
}
