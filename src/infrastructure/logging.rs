//! Diagnostic logging setup
//!
//! Filter comes from `DAYBOOK_LOG`, falling back to `RUST_LOG`, then to
//! `warn` (`debug` with `--verbose`). Logs go to stderr so stdout stays
//! usable in pipes.

use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "DAYBOOK_LOG";

fn filter(verbose: bool) -> EnvFilter {
    let default_level = if verbose { "debug" } else { "warn" };

    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Install the global subscriber. Safe to call more than once.
pub fn init(verbose: bool) {
    let _ = fmt()
        .with_env_filter(filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
