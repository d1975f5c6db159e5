//! Tracing subscriber initialization.

use tracing_subscriber::EnvFilter;

/// Directives used when `RUST_LOG` is unset: chatty for our own crates,
/// `info` for everything else.
const DEFAULT_DIRECTIVES: &str = "sitestock_api=debug,info";

/// Install the global JSON subscriber.
///
/// `RUST_LOG` overrides [`DEFAULT_DIRECTIVES`] when set and parseable.
/// Repeated calls (e.g. across integration tests) are no-ops.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));

    let _ = tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .try_init();
}
