//! Logging bootstrap for embedding processes
//!
//! Installs a `tracing` subscriber with an environment-driven filter.
//! Idempotent: repeated calls after the first are no-ops, so library
//! consumers and the bundled binary can both call it safely.

use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Default filter when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "info";

/// Initialise the global tracing subscriber once.
///
/// Honors `RUST_LOG`; falls back to `info` level. Never panics, even
/// when another subscriber was installed first.
pub fn init() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::init;

    #[test]
    fn init_is_idempotent() {
        init();
        init();
    }
}
