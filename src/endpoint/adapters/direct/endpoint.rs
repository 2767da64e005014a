//! Asynchronous `direct:` endpoint.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::context::TestContext;
use crate::endpoint::domain::{ActorSlot, TestActor};
use crate::endpoint::error::{EndpointError, EndpointResult};
use crate::endpoint::ports::{Consumer, Endpoint, EndpointConfiguration, Producer};
use crate::message::domain::{Message, MessageHeaders};

use super::{DirectEndpointConfiguration, MessageQueue, MessageSelector};

/// Fire-and-forget endpoint over a named [`MessageQueue`].
#[derive(Debug)]
pub struct DirectEndpoint {
    name: String,
    configuration: DirectEndpointConfiguration,
    channel: Arc<DirectChannel>,
    actor: ActorSlot,
}

impl DirectEndpoint {
    /// Creates an endpoint bound to `queue`.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        configuration: DirectEndpointConfiguration,
        queue: Arc<MessageQueue>,
    ) -> Self {
        let endpoint_name = name.into();
        Self {
            channel: Arc::new(DirectChannel {
                name: endpoint_name.clone(),
                queue,
            }),
            name: endpoint_name,
            configuration,
            actor: ActorSlot::default(),
        }
    }

    /// The underlying queue.
    #[must_use]
    pub fn queue(&self) -> &MessageQueue {
        &self.channel.queue
    }
}

impl Endpoint for DirectEndpoint {
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
struct DirectChannel {
    name: String,
    queue: Arc<MessageQueue>,
}

impl DirectChannel {
    async fn take(
        &self,
        selector: Option<&MessageSelector>,
        timeout: Duration,
    ) -> EndpointResult<Message> {
        let entry = self
            .queue
            .pop(selector, timeout)
            .await?
            .ok_or_else(|| EndpointError::receive_timeout(&self.name, timeout))?;
        Ok(entry
            .message
            .with_header(MessageHeaders::RECEIVED_FROM, Value::from(self.name.clone())))
    }
}

#[async_trait]
impl Producer for DirectChannel {
    fn name(&self) -> &str {
        &self.name
    }

    async fn send(&self, message: Message, context: &TestContext) -> EndpointResult<()> {
        context.on_outbound(&self.name, &message);
        self.queue.push(message.with_header(
            MessageHeaders::DESTINATION,
            Value::from(self.queue.name().to_owned()),
        ))
    }
}

#[async_trait]
impl Consumer for DirectChannel {
    fn name(&self) -> &str {
        &self.name
    }

    async fn receive(&self, context: &TestContext, timeout: Duration) -> EndpointResult<Message> {
        let message = self.take(None, timeout).await?;
        context.on_inbound(&self.name, &message);
        Ok(message)
    }

    async fn receive_selected(
        &self,
        selector: &str,
        context: &TestContext,
        timeout: Duration,
    ) -> EndpointResult<Message> {
        let parsed = MessageSelector::parse(&context.replace_dynamic_content(selector)?)?;
        let message = self.take(Some(&parsed), timeout).await?;
        context.on_inbound(&self.name, &message);
        Ok(message)
    }
}
