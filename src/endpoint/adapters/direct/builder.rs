//! Property-driven construction of direct endpoints.

use std::sync::Arc;

use crate::context::TestContext;
use crate::endpoint::domain::{EndpointProperties, apply_options};
use crate::endpoint::error::{EndpointError, EndpointResult};
use crate::endpoint::ports::{Endpoint, EndpointBuilder};

use super::component::create_direct_endpoint;
use super::{DIRECT_OPTIONS, DirectEndpointConfiguration};

/// Builds direct endpoints of type `direct` or `direct-sync`.
///
/// The `queue` property is required; `timeout` is optional.
#[derive(Debug, Clone, Copy)]
pub struct DirectEndpointBuilder {
    synchronous: bool,
}

impl DirectEndpointBuilder {
    /// Builder for type `direct`.
    #[must_use]
    pub const fn asynchronous() -> Self {
        Self { synchronous: false }
    }

    /// Builder for type `direct-sync`.
    #[must_use]
    pub const fn synchronous() -> Self {
        Self { synchronous: true }
    }

    const fn endpoint_type(self) -> &'static str {
        if self.synchronous {
            "direct-sync"
        } else {
            "direct"
        }
    }
}

impl EndpointBuilder for DirectEndpointBuilder {
    fn supports(&self, endpoint_type: &str) -> bool {
        endpoint_type.eq_ignore_ascii_case(self.endpoint_type())
    }

    fn build(
        &self,
        name: &str,
        properties: &EndpointProperties,
        context: &TestContext,
    ) -> EndpointResult<Arc<dyn Endpoint>> {
        let has_queue = ["queue", "queueName"]
            .iter()
            .any(|key| properties.contains_key(*key));
        if !has_queue {
            return Err(EndpointError::invalid_parameter(
                "queue",
                "",
                format!("endpoint '{name}' requires a queue"),
            ));
        }
        let mut configuration =
            DirectEndpointConfiguration::new(name, context.settings().default_timeout());
        apply_options(name, &mut configuration, DIRECT_OPTIONS, properties)?;
        create_direct_endpoint(name.to_owned(), configuration, self.synchronous, context)
    }
}
