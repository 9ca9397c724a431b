//! Diagnostic logging to stderr.
//!
//! Stdout carries the report; everything emitted through `tracing` goes to
//! stderr so the two never interleave in a pipe.

use tracing_subscriber::{EnvFilter, fmt};

/// Maps the `-v` count to a default filter directive.
pub const fn level_for(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Installs the global subscriber. `RUST_LOG` wins over `verbose` when set.
/// A second call is a no-op.
pub fn init(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for(verbose)));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
