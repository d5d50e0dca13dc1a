//! Logging infrastructure for Heroforge.
//!
//! Provides centralized tracing setup for the CLI and any future binaries.

use tracing_subscriber::EnvFilter;

/// Initialize logging with sensible defaults
///
/// Default level is INFO; override with the RUST_LOG environment variable.
pub fn init() {
    init_with_level("info")
}

/// Initialize logging with a specific default level
///
/// # Arguments
/// * `default_level` - Default log level (debug, info, warn, error)
///
/// RUST_LOG still takes precedence when set.
pub fn init_with_level(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .init();
}
