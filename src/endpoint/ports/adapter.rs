//! Server-side request handling.

use std::fmt;

use async_trait::async_trait;

use crate::context::TestContext;
use crate::endpoint::error::EndpointResult;
use crate::message::domain::Message;

/// Produces a response for an inbound request.
#[async_trait]
pub trait EndpointAdapter: Send + Sync + fmt::Debug {
    /// Handles `request` and returns the response.
    ///
    /// # Errors
    ///
    /// Returns an endpoint error when no response can be produced.
    async fn handle_message(&self, request: Message, context: &TestContext)
    -> EndpointResult<Message>;
}
