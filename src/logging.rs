//! Structured logging to stderr.
//!
//! Stdout carries only the JSON report, so every event goes to stderr.

use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

/// Variable holding an `EnvFilter` directive, e.g. `repo_rev_checker=debug`.
pub const LOG_VAR: &str = "REPO_REV_LOG";

/// Installs the global subscriber.
///
/// [`LOG_VAR`] wins when set; otherwise `warn`, or `debug` when `verbose`.
/// Calling this twice is harmless: the second call leaves the first
/// subscriber in place.
pub fn init(verbose: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(verbose))
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .try_init();
}

fn filter(verbose: bool) -> EnvFilter {
    let default = if verbose { "debug" } else { "warn" };
    EnvFilter::try_from_env(LOG_VAR).unwrap_or_else(|_| EnvFilter::new(default))
}
