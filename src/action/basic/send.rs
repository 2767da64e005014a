//! Sending messages to endpoints.

use async_trait::async_trait;
use tracing::{debug, info};

use super::store_message;
use crate::action::domain::MessageTemplate;
use crate::action::error::{ActionError, ActionResult};
use crate::action::ports::TestAction;
use crate::context::TestContext;

/// Sends a message through an endpoint's producer.
///
/// With `fork` set, the send runs on a background task registered with
/// the context; a failure is recorded as a context exception and
/// surfaces at the next join point or when the test finishes.
#[derive(Debug, Clone)]
pub struct SendAction {
    endpoint: String,
    message: MessageTemplate,
    fork: bool,
}

impl SendAction {
    /// Sends `message` to the endpoint resolved from `endpoint`.
    #[must_use]
    pub fn new(endpoint: impl Into<String>, message: MessageTemplate) -> Self {
        Self {
            endpoint: endpoint.into(),
            message,
            fork: false,
        }
    }

    /// Sends without blocking the test.
    #[must_use]
    pub const fn forked(mut self) -> Self {
        self.fork = true;
        self
    }

    /// The endpoint URI or name.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl TestAction for SendAction {
    fn name(&self) -> &'static str {
        "send"
    }

    fn is_disabled(&self, context: &TestContext) -> bool {
        context
            .resolve_endpoint(&self.endpoint)
            .ok()
            .and_then(|endpoint| endpoint.actor())
            .is_some_and(|actor| actor.is_disabled())
    }

    async fn execute(&self, context: &TestContext) -> ActionResult<()> {
        let endpoint = context.resolve_endpoint(&self.endpoint)?;
        let message = self.message.build(context)?;
        store_message(context, self.name(), endpoint.name(), &message)?;
        context.on_outbound(endpoint.name(), &message);

        let producer = endpoint.create_producer();
        if self.fork {
            debug!(endpoint = endpoint.name(), "forking send");
            let forked = context.clone();
            let handle = tokio::spawn(async move {
                if let Err(err) = producer.send(message, &forked).await {
                    forked.add_exception(ActionError::from(err));
                }
            });
            context.register_fork(handle);
            return Ok(());
        }

        producer.send(message, context).await?;
        info!(endpoint = endpoint.name(), "message sent");
        Ok(())
    }
}
