//! JSON log subscriber.
//!
//! Request handlers and the shop service log through `tracing` macros; this
//! module only decides where those events go and at which level.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

/// One JSON object per event on stdout, filtered by `RUST_LOG` (`info` when
/// unset or unparsable). A subscriber that is already installed wins.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}
