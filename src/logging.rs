//! Process-wide tracing setup.
//!
//! `RUST_LOG` overrides the default `info` filter. Records emitted through the
//! `log` facade (actix-web's request logger) are forwarded into the same
//! subscriber.

use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_FILTER: &str = "info";

/// Install the global subscriber. Later calls are no-ops, so tests may call it freely.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = fmt().with_env_filter(filter).try_init();
}
