//! Logging setup for the host process.
//!
//! Logs go to stderr; stdout belongs to the plugin handshake. Filtering
//! follows `RUST_LOG` and defaults to `info`, e.g.
//! `RUST_LOG=compose=debug` shows every whitelist poll.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn subscriber(default_level: &str) -> impl tracing::Subscriber + Send + Sync + 'static {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry().with(filter).with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false),
    )
}

/// Install the global subscriber. Returns `false` if one is already set.
pub fn init_logging() -> bool {
    subscriber("info").try_init().is_ok()
}
