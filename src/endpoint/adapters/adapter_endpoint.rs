//! Endpoint whose responses come from an [`EndpointAdapter`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::context::TestContext;
use crate::endpoint::adapters::direct::{DirectEndpointConfiguration, MessageQueue};
use crate::endpoint::domain::{ActorSlot, TestActor};
use crate::endpoint::error::{EndpointError, EndpointResult};
use crate::endpoint::ports::{Consumer, Endpoint, EndpointAdapter, EndpointConfiguration, Producer};
use crate::message::domain::Message;

/// Sending to this endpoint runs the adapter; receiving returns the
/// adapter's responses in order.
#[derive(Debug)]
pub struct AdapterEndpoint {
    name: String,
    configuration: DirectEndpointConfiguration,
    channel: Arc<AdapterChannel>,
    actor: ActorSlot,
}

impl AdapterEndpoint {
    /// Creates an endpoint answering through `adapter`.
    #[must_use]
    pub fn new(name: impl Into<String>, adapter: Arc<dyn EndpointAdapter>, timeout: Duration) -> Self {
        let endpoint_name = name.into();
        Self {
            configuration: DirectEndpointConfiguration::new(endpoint_name.clone(), timeout),
            channel: Arc::new(AdapterChannel {
                name: endpoint_name.clone(),
                adapter,
                responses: MessageQueue::new(endpoint_name.clone()),
            }),
            name: endpoint_name,
            actor: ActorSlot::default(),
        }
    }
}

impl Endpoint for AdapterEndpoint {
    fn name(&self) -> &str {
        &self.name
    }

    fn configuration(&self) -> &dyn EndpointConfiguration {
        &self.configuration
    }

    fn create_producer(&self) -> Arc<dyn Producer> {
        self.channel.clone()
    }

    fn create_consumer(&self) -> Arc<dyn Consumer> {
        self.channel.clone()
    }

    fn actor(&self) -> Option<TestActor> {
        self.actor.get()
    }

    fn set_actor(&self, actor: Option<TestActor>) {
        self.actor.set(actor);
    }
}

#[derive(Debug)]
struct AdapterChannel {
    name: String,
    adapter: Arc<dyn EndpointAdapter>,
    responses: MessageQueue,
}

#[async_trait]
impl Producer for AdapterChannel {
    fn name(&self) -> &str {
        &self.name
    }

    async fn send(&self, message: Message, context: &TestContext) -> EndpointResult<()> {
        context.on_outbound(&self.name, &message);
        let response = self.adapter.handle_message(message, context).await?;
        self.responses.push(response)
    }
}

#[async_trait]
impl Consumer for AdapterChannel {
    fn name(&self) -> &str {
        &self.name
    }

    async fn receive(&self, context: &TestContext, timeout: Duration) -> EndpointResult<Message> {
        let entry = self
            .responses
            .pop(None, timeout)
            .await?
            .ok_or_else(|| EndpointError::receive_timeout(&self.name, timeout))?;
        context.on_inbound(&self.name, &entry.message);
        Ok(entry.message)
    }
}
