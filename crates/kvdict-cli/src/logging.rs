//! Logging initialization.

use crate::cli::LogLevel;
use tracing_subscriber::EnvFilter;

/// Initialize logging at the given level.
///
/// `RUST_LOG` wins when set. Logs go to stderr; stdout carries documents.
pub fn init_logging(level: LogLevel) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    // A second init (tests, embedding) keeps the existing subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
