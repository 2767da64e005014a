//! Request/reply `direct:sync:` endpoint.
//!
//! The client side stores the pending reply receiver under a fresh
//! correlation key and remembers that key in a context variable, so a
//! later receive on the same context picks up the matching reply. The
//! server side does the same with the reply sender of each request it
//! consumes.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::oneshot;
use tracing::debug;
use uuid::Uuid;

use crate::context::TestContext;
use crate::endpoint::domain::{ActorSlot, TestActor};
use crate::endpoint::error::{EndpointError, EndpointResult};
use crate::endpoint::ports::{Consumer, Endpoint, EndpointConfiguration, Producer};
use crate::message::domain::{Message, MessageHeaders};

use super::queue::QueuedMessage;
use super::{DirectEndpointConfiguration, MessageQueue, MessageSelector};

/// Request/reply endpoint over a named [`MessageQueue`].
#[derive(Debug)]
pub struct DirectSyncEndpoint {
    name: String,
    configuration: DirectEndpointConfiguration,
    queue: Arc<MessageQueue>,
    role: OnceLock<SyncRole>,
    actor: ActorSlot,
}

#[derive(Debug)]
enum SyncRole {
    Client(Arc<SyncClient>),
    Server(Arc<SyncServer>),
}

impl DirectSyncEndpoint {
    /// Creates an endpoint bound to `queue`.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        configuration: DirectEndpointConfiguration,
        queue: Arc<MessageQueue>,
    ) -> Self {
        Self {
            name: name.into(),
            configuration,
            queue,
            role: OnceLock::new(),
            actor: ActorSlot::default(),
        }
    }

    /// The underlying queue.
    #[must_use]
    pub fn queue(&self) -> &MessageQueue {
        &self.queue
    }

    fn client(&self) -> Arc<SyncClient> {
        Arc::new(SyncClient {
            name: self.name.clone(),
            queue: self.queue.clone(),
            pending: Mutex::new(HashMap::new()),
        })
    }

    fn server(&self) -> Arc<SyncServer> {
        Arc::new(SyncServer {
            name: self.name.clone(),
            queue: self.queue.clone(),
            reply_channels: Mutex::new(HashMap::new()),
        })
    }
}

impl Endpoint for DirectSyncEndpoint {
    fn name(&self) -> &str {
        &self.name
    }

    fn configuration(&self) -> &dyn EndpointConfiguration {
        &self.configuration
    }

    fn create_producer(&self) -> Arc<dyn Producer> {
        match self.role.get_or_init(|| SyncRole::Client(self.client())) {
            SyncRole::Client(client) => client.clone(),
            SyncRole::Server(server) => server.clone(),
        }
    }

    fn create_consumer(&self) -> Arc<dyn Consumer> {
        match self.role.get_or_init(|| SyncRole::Server(self.server())) {
            SyncRole::Client(client) => client.clone(),
            SyncRole::Server(server) => server.clone(),
        }
    }

    fn actor(&self) -> Option<TestActor> {
        self.actor.get()
    }

    fn set_actor(&self, actor: Option<TestActor>) {
        self.actor.set(actor);
    }
}

fn correlation_variable(endpoint: &str) -> String {
    format!("caliper_correlation_key_{endpoint}")
}

/// Sends requests and receives their replies.
#[derive(Debug)]
struct SyncClient {
    name: String,
    queue: Arc<MessageQueue>,
    pending: Mutex<HashMap<String, oneshot::Receiver<Message>>>,
}

#[async_trait]
impl Producer for SyncClient {
    fn name(&self) -> &str {
        &self.name
    }

    async fn send(&self, message: Message, context: &TestContext) -> EndpointResult<()> {
        let key = Uuid::new_v4().to_string();
        let (reply_to, reply) = oneshot::channel();
        let request = message
            .with_header(MessageHeaders::SYNC_CORRELATION_KEY, Value::from(key.clone()))
            .with_header(
                MessageHeaders::DESTINATION,
                Value::from(self.queue.name().to_owned()),
            );
        context.on_outbound(&self.name, &request);
        self.pending
            .lock()
            .map_err(EndpointError::poisoned)?
            .insert(key.clone(), reply);
        context.set_variable(&correlation_variable(&self.name), key)?;
        self.queue.enqueue(QueuedMessage {
            message: request,
            reply_to: Some(reply_to),
        })
    }
}

#[async_trait]
impl Consumer for SyncClient {
    fn name(&self) -> &str {
        &self.name
    }

    async fn receive(&self, context: &TestContext, timeout: Duration) -> EndpointResult<Message> {
        let variable = correlation_variable(&self.name);
        if !context.has_variable(&variable) {
            return Err(EndpointError::missing_correlation(&self.name, "reply"));
        }
        let key = context.get_variable_text(&variable)?;
        let pending = self
            .pending
            .lock()
            .map_err(EndpointError::poisoned)?
            .remove(&key)
            .ok_or_else(|| EndpointError::missing_correlation(&self.name, "reply"))?;
        let reply = tokio::time::timeout(timeout, pending)
            .await
            .map_err(|_| EndpointError::receive_timeout(&self.name, timeout))?
            .map_err(|_| EndpointError::ReplyChannelClosed(self.name.clone()))?;
        context.on_inbound(&self.name, &reply);
        Ok(reply)
    }
}

/// Receives requests and sends replies back to their senders.
#[derive(Debug)]
struct SyncServer {
    name: String,
    queue: Arc<MessageQueue>,
    reply_channels: Mutex<HashMap<String, oneshot::Sender<Message>>>,
}

impl SyncServer {
    async fn take(
        &self,
        selector: Option<&MessageSelector>,
        context: &TestContext,
        timeout: Duration,
    ) -> EndpointResult<Message> {
        let QueuedMessage { message, reply_to } = self
            .queue
            .pop(selector, timeout)
            .await?
            .ok_or_else(|| EndpointError::receive_timeout(&self.name, timeout))?;
        if let Some(sender) = reply_to {
            let key = message
                .header_text(MessageHeaders::SYNC_CORRELATION_KEY)
                .unwrap_or_else(|| Uuid::new_v4().to_string());
            self.reply_channels
                .lock()
                .map_err(EndpointError::poisoned)?
                .insert(key.clone(), sender);
            context.set_variable(&correlation_variable(&self.name), key)?;
        } else {
            debug!(endpoint = %self.name, "received request without reply channel");
        }
        let received = message.with_header(MessageHeaders::RECEIVED_FROM, Value::from(self.name.clone()));
        context.on_inbound(&self.name, &received);
        Ok(received)
    }
}

#[async_trait]
impl Consumer for SyncServer {
    fn name(&self) -> &str {
        &self.name
    }

    async fn receive(&self, context: &TestContext, timeout: Duration) -> EndpointResult<Message> {
        self.take(None, context, timeout).await
    }

    async fn receive_selected(
        &self,
        selector: &str,
        context: &TestContext,
        timeout: Duration,
    ) -> EndpointResult<Message> {
        let parsed = MessageSelector::parse(&context.replace_dynamic_content(selector)?)?;
        self.take(Some(&parsed), context, timeout).await
    }
}

#[async_trait]
impl Producer for SyncServer {
    fn name(&self) -> &str {
        &self.name
    }

    async fn send(&self, message: Message, context: &TestContext) -> EndpointResult<()> {
        let variable = correlation_variable(&self.name);
        if !context.has_variable(&variable) {
            return Err(EndpointError::missing_correlation(&self.name, "reply channel"));
        }
        let key = context.get_variable_text(&variable)?;
        let sender = self
            .reply_channels
            .lock()
            .map_err(EndpointError::poisoned)?
            .remove(&key)
            .ok_or_else(|| EndpointError::missing_correlation(&self.name, "reply channel"))?;
        let reply = message.with_header(MessageHeaders::SYNC_CORRELATION_KEY, Value::from(key));
        context.on_outbound(&self.name, &reply);
        sender
            .send(reply)
            .map_err(|_| EndpointError::ReplyChannelClosed(self.name.clone()))
    }
}
