//! `tracing` subscriber setup.

use crate::config::Config;
use tracing_subscriber::EnvFilter;

fn filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Install a fmt subscriber using the default [`Config`] filter. `RUST_LOG` wins when set.
pub fn init() {
    init_with_filter(&Config::default().log_filter);
}

pub fn init_with_filter(default: &str) {
    tracing_subscriber::fmt().with_env_filter(filter(default)).init();
}

/// Like [`init`], but tolerates an already installed subscriber (useful in tests).
/// Returns `true` if this call installed it.
pub fn try_init() -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(filter(&Config::default().log_filter))
        .with_test_writer()
        .try_init()
        .is_ok()
}
