//! Endpoint, producer and consumer contracts.

use std::any::Any;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use crate::context::TestContext;
use crate::endpoint::domain::TestActor;
use crate::endpoint::error::EndpointResult;
use crate::message::domain::Message;

/// Type-specific endpoint settings.
pub trait EndpointConfiguration: Send + Sync + fmt::Debug {
    /// Default timeout for receive operations.
    fn timeout(&self) -> Duration;

    /// Allows downcasting to the concrete configuration.
    fn as_any(&self) -> &dyn Any;
}

/// Sends messages to an endpoint.
#[async_trait]
pub trait Producer: Send + Sync {
    /// Producer name, used in logs and message store keys.
    fn name(&self) -> &str;

    /// Sends `message`.
    ///
    /// # Errors
    ///
    /// Returns an endpoint error when the message cannot be delivered.
    async fn send(&self, message: Message, context: &TestContext) -> EndpointResult<()>;
}

/// Receives messages from an endpoint.
#[async_trait]
pub trait Consumer: Send + Sync {
    /// Consumer name, used in logs and message store keys.
    fn name(&self) -> &str;

    /// Waits up to `timeout` for the next message.
    ///
    /// # Errors
    ///
    /// Returns [`crate::endpoint::error::EndpointError::ReceiveTimeout`]
    /// when no message arrives in time.
    async fn receive(&self, context: &TestContext, timeout: Duration) -> EndpointResult<Message>;

    /// Waits for the next message matching `selector`.
    ///
    /// Consumers without selector support ignore the selector.
    ///
    /// # Errors
    ///
    /// As for [`Consumer::receive`].
    async fn receive_selected(
        &self,
        selector: &str,
        context: &TestContext,
        timeout: Duration,
    ) -> EndpointResult<Message> {
        warn!(
            consumer = self.name(),
            selector, "consumer does not support message selectors, receiving next message"
        );
        self.receive(context, timeout).await
    }
}

/// A named messaging endpoint.
pub trait Endpoint: Send + Sync + fmt::Debug {
    /// Endpoint name.
    fn name(&self) -> &str;

    /// Endpoint configuration.
    fn configuration(&self) -> &dyn EndpointConfiguration;

    /// Returns the producer used for send operations.
    fn create_producer(&self) -> Arc<dyn Producer>;

    /// Returns the consumer used for receive operations.
    fn create_consumer(&self) -> Arc<dyn Consumer>;

    /// Returns the actor bound to this endpoint.
    fn actor(&self) -> Option<TestActor>;

    /// Binds an actor to this endpoint.
    fn set_actor(&self, actor: Option<TestActor>);
}
