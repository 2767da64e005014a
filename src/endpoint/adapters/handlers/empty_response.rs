//! Adapter answering every request with an empty message.

use async_trait::async_trait;

use crate::context::TestContext;
use crate::endpoint::error::EndpointResult;
use crate::endpoint::ports::EndpointAdapter;
use crate::message::domain::{Message, Payload};

/// Returns an empty response for every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyResponseEndpointAdapter;

#[async_trait]
impl EndpointAdapter for EmptyResponseEndpointAdapter {
    async fn handle_message(
        &self,
        _request: Message,
        context: &TestContext,
    ) -> EndpointResult<Message> {
        Ok(Message::new(Payload::Empty, context.clock()))
    }
}
