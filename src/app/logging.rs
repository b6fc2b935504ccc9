//! Diagnostic logging to stderr.

use std::io;

use tracing_subscriber::{EnvFilter, fmt::Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter directive for a `-v` count.
pub fn level_for_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. `RUST_LOG` takes precedence over `-v`.
///
/// Command output goes to stdout, so events are written to stderr.
pub fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for_verbosity(verbose)));

    let result = tracing_subscriber::registry()
        .with(filter)
        .with(Layer::new().with_writer(io::stderr).with_target(false))
        .try_init();

    if result.is_err() {
        tracing::debug!("logging already initialized");
    }
}
