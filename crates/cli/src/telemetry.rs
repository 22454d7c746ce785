//! Tracing/logging initialization for the binary.

use tracing_subscriber::EnvFilter;

/// Initialize tracing for the process. Safe to call multiple times
/// (subsequent calls are no-ops). `RUST_LOG` overrides the default
/// `info` filter.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .with_target(false)
        .try_init();
}
