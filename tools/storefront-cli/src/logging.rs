//! Tracing/logging initialization.

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Initialize tracing for the process.
///
/// `RUST_LOG` wins over the configured level; `--verbose` raises the
/// fallback to `debug`. Logs go to stderr so command output stays clean.
pub fn init(config: &LoggingConfig, verbose: bool) {
    let fallback = if verbose { "debug" } else { config.level.as_str() };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    // Safe to call more than once; later calls are no-ops.
    let _ = if config.json {
        builder.json().try_init()
    } else {
        builder.compact().try_init()
    };
}
