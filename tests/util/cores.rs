// Tests for util/cores.rs: core counting and worker-count defaults.

use lz77::config::{ENV_NBWORKERS, NB_WORKERS_MAX};
use lz77::util::cores::auto_nb_workers;
use lz77::util::{count_cores, default_nb_workers, parse_nb_workers};

#[test]
fn count_cores_at_least_one() {
    assert!(count_cores() >= 1);
}

#[test]
fn auto_workers_within_core_count() {
    let n = auto_nb_workers();
    assert!(n >= 1);
    assert!(n <= num_cpus::get_physical().max(1));
}

#[test]
fn parse_nb_workers_values() {
    assert_eq!(parse_nb_workers("1"), Some(1));
    assert_eq!(parse_nb_workers("\t12\n"), Some(12));
    assert_eq!(parse_nb_workers("0"), None);
    assert_eq!(parse_nb_workers(""), None);
    assert_eq!(parse_nb_workers("3x"), None);
    assert_eq!(parse_nb_workers("201"), Some(NB_WORKERS_MAX));
}

// The only test in this binary that touches the environment.
#[test]
fn environment_overrides_default() {
    std::env::set_var(ENV_NBWORKERS, "5");
    assert_eq!(default_nb_workers(), 5);

    std::env::set_var(ENV_NBWORKERS, "500");
    assert_eq!(default_nb_workers(), NB_WORKERS_MAX);

    std::env::set_var(ENV_NBWORKERS, "zero");
    let fallback = default_nb_workers();
    assert!((1..=NB_WORKERS_MAX).contains(&fallback));

    std::env::remove_var(ENV_NBWORKERS);
    assert_eq!(default_nb_workers(), auto_nb_workers().clamp(1, NB_WORKERS_MAX));
}
