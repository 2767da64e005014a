//! Settings value types.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::message::domain::MessageType;

/// Runtime defaults shared by every test context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Receive timeout applied when an action or endpoint declares none.
    pub default_timeout_ms: u64,
    /// Pause between polls of queues and wait conditions.
    pub polling_interval_ms: u64,
    /// How long a finishing test waits for forked actions.
    pub async_completion_timeout_ms: u64,
    /// Message type assumed by receive actions that declare none.
    pub default_message_type: MessageType,
    /// Prefix that marks a function call in dynamic content.
    pub function_prefix: String,
    /// Variable holding the running test's name.
    pub test_name_variable: String,
    /// Variable holding the running test's package.
    pub test_package_variable: String,
    /// Default `tracing` filter directive.
    pub log_filter: String,
    /// Variables seeded into every new context.
    pub global_variables: BTreeMap<String, String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_timeout_ms: 5000,
            polling_interval_ms: 500,
            async_completion_timeout_ms: 10_000,
            default_message_type: MessageType::Xml,
            function_prefix: "citrus:".to_owned(),
            test_name_variable: "caliper.test.name".to_owned(),
            test_package_variable: "caliper.test.package".to_owned(),
            log_filter: "info".to_owned(),
            global_variables: BTreeMap::new(),
        }
    }
}

impl Settings {
    /// Default receive timeout.
    #[must_use]
    pub const fn default_timeout(&self) -> Duration {
        Duration::from_millis(self.default_timeout_ms)
    }

    /// Default polling interval.
    #[must_use]
    pub const fn polling_interval(&self) -> Duration {
        Duration::from_millis(self.polling_interval_ms)
    }

    /// Time allowed for forked actions to complete at test finish.
    #[must_use]
    pub const fn async_completion_timeout(&self) -> Duration {
        Duration::from_millis(self.async_completion_timeout_ms)
    }
}

/// Converts a duration to whole milliseconds, saturating at `u64::MAX`.
#[must_use]
pub(crate) fn to_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
