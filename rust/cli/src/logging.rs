//! Diagnostic logging setup for the `rinkside` binary.
//!
//! Engine events go to stderr through a `tracing-subscriber` fmt layer.
//! `RUST_LOG` picks the filter; without it only warnings are shown, so
//! command output on stdout stays clean.

use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "warn";

pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global subscriber. Calling it twice is harmless.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}
