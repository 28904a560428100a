//! Process-wide log output for the storefront binaries.

/// Install the JSON log subscriber. Later calls keep the first subscriber.
pub fn init() {
    tracing::init();
}

pub mod tracing;
