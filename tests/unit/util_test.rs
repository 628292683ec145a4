//! Tests for utility functions

use slurm_watch::util::{init_test_tracing, now_ms};

#[test]
fn test_now_ms_is_monotonic_enough() {
    let a = now_ms();
    let b = now_ms();
    assert!(a > 0);
    assert!(b >= a);
}

#[test]
fn test_tracing_init_is_idempotent() {
    init_test_tracing();
    init_test_tracing();
    slurm_watch::util::init_tracing();
}
