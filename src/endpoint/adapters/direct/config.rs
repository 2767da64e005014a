//! Configuration shared by the direct endpoint types.

use std::any::Any;
use std::time::Duration;

use crate::endpoint::domain::{EndpointOption, parse_millis};
use crate::endpoint::error::{EndpointError, EndpointResult};
use crate::endpoint::ports::EndpointConfiguration;

/// Settings of a direct endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectEndpointConfiguration {
    queue_name: String,
    timeout: Duration,
}

impl DirectEndpointConfiguration {
    /// Creates a configuration for `queue_name`.
    #[must_use]
    pub fn new(queue_name: impl Into<String>, timeout: Duration) -> Self {
        Self {
            queue_name: queue_name.into(),
            timeout,
        }
    }

    /// Name of the queue the endpoint is bound to.
    #[must_use]
    pub fn queue_name(&self) -> &str {
        &self.queue_name
    }

    fn set_queue(&mut self, value: &str) -> EndpointResult<()> {
        if value.trim().is_empty() {
            return Err(EndpointError::invalid_parameter(
                "queue",
                value,
                "queue name must not be empty",
            ));
        }
        value.trim().clone_into(&mut self.queue_name);
        Ok(())
    }
}

impl EndpointConfiguration for DirectEndpointConfiguration {
    fn timeout(&self) -> Duration {
        self.timeout
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Options understood by `direct:` URIs and the direct builders.
pub static DIRECT_OPTIONS: &[EndpointOption<DirectEndpointConfiguration>] = &[
    EndpointOption {
        name: "timeout",
        apply: |config, value| {
            config.timeout = parse_millis("timeout", value)?;
            Ok(())
        },
    },
    EndpointOption {
        name: "queue",
        apply: DirectEndpointConfiguration::set_queue,
    },
    EndpointOption {
        name: "queueName",
        apply: DirectEndpointConfiguration::set_queue,
    },
];
