//! Framework settings.
//!
//! Settings are read from layered sources with the following precedence
//! (highest to lowest):
//! 1. Environment variables (`CALIPER__*`)
//! 2. An optional TOML file
//! 3. Built-in defaults

mod loader;
mod types;

pub use loader::{load_settings, load_settings_from_str};
pub use types::Settings;
pub(crate) use types::to_millis;

use thiserror::Error;

/// Errors raised while loading settings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    /// A source could not be read or deserialised.
    #[error("failed to load settings: {0}")]
    Load(String),

    /// A value was read but is not acceptable.
    #[error("invalid setting '{field}': {reason}")]
    Invalid {
        /// Name of the offending field.
        field: String,
        /// Why the value was rejected.
        reason: String,
    },
}

#[cfg(test)]
mod tests;
