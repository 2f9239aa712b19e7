//! Logging setup for aimtrackctl
//!
//! Diagnostics go to stderr so report text on stdout stays clean.
//! `RUST_LOG` wins over the configured level.

use tracing_subscriber::EnvFilter;

/// Build the filter from `RUST_LOG`, else the configured level, else `warn`
pub fn build_filter(configured_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(configured_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Install the global subscriber. Safe to call more than once.
pub fn init(configured_level: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_filter(configured_level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
