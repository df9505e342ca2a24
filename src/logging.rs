//! Diagnostic logging setup.
//!
//! Logs go to stderr so they never mix with console output on stdout.

use std::io;

use tracing_subscriber::EnvFilter;

/// Filter used when neither `--log-level` nor `RUST_LOG` is set.
pub const DEFAULT_FILTER: &str = "warn";

/// Build the log filter from an explicit directive, `RUST_LOG`, or the default.
pub fn filter(directive: Option<&str>) -> EnvFilter {
    match directive {
        Some(d) => EnvFilter::new(d),
        None => {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
        }
    }
}

/// Install the global subscriber. Later calls are ignored.
pub fn init(directive: Option<&str>) {
    let result = tracing_subscriber::fmt()
        .with_env_filter(filter(directive))
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
    if result.is_err() {
        tracing::debug!("log subscriber already installed");
    }
}
