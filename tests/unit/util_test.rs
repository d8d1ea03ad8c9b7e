//! Tests for utility functions

use job_queue::util::{init_tracing, init_tracing_with, DEFAULT_FILTER};

#[test]
fn test_init_tracing_is_repeatable() {
    init_tracing();
    init_tracing();
    init_tracing_with("debug");
}

#[test]
fn test_default_filter_targets_crate() {
    assert!(DEFAULT_FILTER.starts_with("job_queue"));
}
