//! Telemetry helpers for structured logging.

use tracing_subscriber::EnvFilter;

/// Filter applied when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "job_queue=info";

/// Install a default env-filtered subscriber if none is set yet.
pub fn init_tracing() {
    init_tracing_with(DEFAULT_FILTER);
}

/// Like [`init_tracing`], falling back to `default_filter` when `RUST_LOG`
/// is absent or invalid.
pub fn init_tracing_with(default_filter: &str) {
    if tracing::dispatcher::has_been_set() {
        return;
    }
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
