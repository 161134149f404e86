//! Diagnostics setup.
//!
//! Installs a `tracing-subscriber` fmt subscriber on stderr so that report
//! output on stdout stays clean. Records emitted through the `log` facade by
//! the engine are bridged into the same subscriber.

use crate::error::{AppError, Result};
use crate::options::Verbosity;
use tracing_subscriber::EnvFilter;

/// Initialize logging; `RUST_LOG` overrides the level derived from the flags.
///
/// # Errors
/// Returns an error if a global subscriber is already installed.
pub fn init(verbosity: Verbosity) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.directive()));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init()
        .map_err(|e| AppError::Logging(e.to_string()))
}
