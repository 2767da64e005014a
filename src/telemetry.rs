//! Tracing subscriber installation.
//!
//! The framework logs through `tracing`; binaries and test harnesses call
//! [`init_tracing`] once to route those events to stderr.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::settings::Settings;

/// Installs a global `fmt` subscriber filtered by `RUST_LOG`, falling back
/// to [`Settings::log_filter`].
///
/// Returns `false` when a global subscriber was already installed.
#[must_use]
pub fn init_tracing(settings: &Settings) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .with(filter)
        .try_init()
        .is_ok()
}
