//! Log initialization for suite runs.
//!
//! Scenario lifecycle events are emitted through `tracing`; this module
//! wires a subscriber so they become visible. Filtering follows `RUST_LOG`,
//! defaulting to `ingresar=info`.

use tracing_subscriber::{fmt, EnvFilter};

/// Default filter applied when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "ingresar=info";

/// Install the global subscriber.
///
/// Safe to call more than once; later calls are no-ops. Intended for test
/// binaries and harness entry points.
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init();
        init();
    }

    #[test]
    fn test_default_filter_parses() {
        assert!(EnvFilter::try_new(DEFAULT_FILTER).is_ok());
    }
}
