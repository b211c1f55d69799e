//! Tracing setup.
//!
//! Stdout carries the protocol, so logs always go to stderr.

use tracing_subscriber::EnvFilter;

/// Filter used when neither `--log-filter` nor `RUST_LOG` is set.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Build the filter: explicit directive first, then `RUST_LOG`, then the default.
pub fn env_filter(explicit: Option<&str>) -> EnvFilter {
    explicit
        .and_then(|directive| EnvFilter::try_new(directive).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Install the global subscriber writing compact lines to stderr.
pub fn init(explicit: Option<&str>) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(explicit))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .compact()
        .init();
}
