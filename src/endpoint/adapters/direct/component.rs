//! The `direct` URI scheme.

use std::sync::Arc;

use crate::context::TestContext;
use crate::endpoint::domain::{EndpointUri, apply_options};
use crate::endpoint::error::{EndpointError, EndpointResult};
use crate::endpoint::ports::{Endpoint, EndpointComponent};

use super::{
    DIRECT_OPTIONS, DirectEndpoint, DirectEndpointConfiguration, DirectSyncEndpoint, MessageQueue,
};

const SYNC_PREFIX: &str = "sync:";

/// Creates [`DirectEndpoint`]s for `direct:<queue>` and
/// [`DirectSyncEndpoint`]s for `direct:sync:<queue>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectEndpointComponent;

impl EndpointComponent for DirectEndpointComponent {
    fn name(&self) -> &'static str {
        "direct"
    }

    fn create_endpoint(
        &self,
        uri: &str,
        context: &TestContext,
    ) -> EndpointResult<Arc<dyn Endpoint>> {
        let parsed = EndpointUri::parse(uri)?;
        let (synchronous, queue_name) = parsed
            .resource()
            .strip_prefix(SYNC_PREFIX)
            .map_or((false, parsed.resource()), |queue| (true, queue));
        if queue_name.trim().is_empty() {
            return Err(EndpointError::InvalidEndpointUri(uri.to_owned()));
        }

        let mut configuration =
            DirectEndpointConfiguration::new(queue_name, context.settings().default_timeout());
        apply_options(
            uri,
            &mut configuration,
            DIRECT_OPTIONS,
            &parsed.configuration_parameters(),
        )?;
        let name = parsed.endpoint_name().unwrap_or(parsed.as_str()).to_owned();

        create_direct_endpoint(name, configuration, synchronous, context)
    }
}

pub(super) fn create_direct_endpoint(
    name: String,
    configuration: DirectEndpointConfiguration,
    synchronous: bool,
    context: &TestContext,
) -> EndpointResult<Arc<dyn Endpoint>> {
    let queue_name = configuration.queue_name().to_owned();
    let queue = context
        .references()
        .resolve_or_bind(&queue_name, || Arc::new(MessageQueue::new(queue_name.clone())))?;
    Ok(if synchronous {
        Arc::new(DirectSyncEndpoint::new(name, configuration, queue))
    } else {
        Arc::new(DirectEndpoint::new(name, configuration, queue))
    })
}
