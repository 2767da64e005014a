//! Adapter forwarding requests into a synchronous endpoint.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use crate::context::TestContext;
use crate::endpoint::error::{EndpointError, EndpointResult};
use crate::endpoint::ports::{Consumer, Endpoint, EndpointAdapter, Producer};
use crate::message::domain::Message;

use super::EmptyResponseEndpointAdapter;

/// Sends each request to an endpoint and returns its reply.
///
/// Typically bound to a `direct:sync:` endpoint so a test can receive the
/// forwarded request and send the response itself. When no reply arrives
/// in time, the fallback adapter answers instead.
#[derive(Clone)]
pub struct DirectEndpointAdapter {
    producer: Arc<dyn Producer>,
    consumer: Arc<dyn Consumer>,
    timeout: Duration,
    fallback: Arc<dyn EndpointAdapter>,
}

impl DirectEndpointAdapter {
    /// Creates an adapter for `endpoint` using its configured timeout.
    #[must_use]
    pub fn new(endpoint: &dyn Endpoint) -> Self {
        Self {
            producer: endpoint.create_producer(),
            consumer: endpoint.create_consumer(),
            timeout: endpoint.configuration().timeout(),
            fallback: Arc::new(EmptyResponseEndpointAdapter),
        }
    }

    /// Overrides the reply timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Overrides the adapter used when no reply arrives.
    #[must_use]
    pub fn with_fallback(mut self, fallback: Arc<dyn EndpointAdapter>) -> Self {
        self.fallback = fallback;
        self
    }
}

impl std::fmt::Debug for DirectEndpointAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectEndpointAdapter")
            .field("endpoint", &self.producer.name())
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl EndpointAdapter for DirectEndpointAdapter {
    async fn handle_message(&self, request: Message, context: &TestContext) -> EndpointResult<Message> {
        self.producer.send(request.clone(), context).await?;
        match self.consumer.receive(context, self.timeout).await {
            Ok(reply) => Ok(reply),
            Err(EndpointError::ReceiveTimeout { .. }) => {
                warn!(
                    endpoint = self.producer.name(),
                    "no reply within timeout, using fallback adapter"
                );
                self.fallback.handle_message(request, context).await
            }
            Err(err) => Err(err),
        }
    }
}
