//! Diagnostic logging setup.
//!
//! Report text goes to stdout; `tracing` events go to stderr so they never
//! mix with the report.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the global subscriber. `verbose` forces the `debug` level,
/// otherwise `RUST_LOG` is honored and defaults to `warn`.
///
/// Calling it more than once is harmless; later calls are ignored.
pub fn init(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
