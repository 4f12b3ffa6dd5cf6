//! Tracing subscriber setup.
//!
//! Logs go to stderr; stdout carries command output only.

use std::io;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (`RUST_LOG` syntax).
pub const LOG_ENV: &str = "BRIEFDESK_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Builds the filter from `BRIEFDESK_LOG`, then the configured level, then `warn`.
pub fn env_filter(config_level: Option<&str>) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_env(LOG_ENV) {
        return filter;
    }

    config_level
        .map(str::trim)
        .filter(|level| !level.is_empty())
        .and_then(|level| EnvFilter::try_new(level).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global subscriber. Calling it twice is a no-op.
pub fn init(config_level: Option<&str>) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(config_level))
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}
