//! Adapter answering with a fixed, placeholder-resolved response.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::Value;

use crate::context::TestContext;
use crate::endpoint::error::EndpointResult;
use crate::endpoint::ports::EndpointAdapter;
use crate::message::domain::{Message, Payload};

/// Returns the configured payload and headers for every request.
///
/// Text payloads and header values have `${...}` and functions resolved
/// against the context at response time.
#[derive(Debug, Clone, Default)]
pub struct StaticResponseEndpointAdapter {
    payload: Payload,
    headers: BTreeMap<String, Value>,
}

impl StaticResponseEndpointAdapter {
    /// Creates an adapter responding with `payload`.
    #[must_use]
    pub fn new(payload: impl Into<Payload>) -> Self {
        Self {
            payload: payload.into(),
            headers: BTreeMap::new(),
        }
    }

    /// Adds a response header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: Value) -> Self {
        self.headers.insert(name.into(), value);
        self
    }
}

#[async_trait]
impl EndpointAdapter for StaticResponseEndpointAdapter {
    async fn handle_message(
        &self,
        _request: Message,
        context: &TestContext,
    ) -> EndpointResult<Message> {
        let payload = match &self.payload {
            Payload::Text(text) => Payload::Text(context.replace_dynamic_content(text)?),
            Payload::Json(json) => Payload::Json(context.resolve_dynamic_value(json)?),
            other => other.clone(),
        };
        let mut builder = Message::builder(payload);
        for (name, value) in &self.headers {
            builder = builder.with_header(name.clone(), context.resolve_dynamic_value(value)?);
        }
        Ok(builder.build(context.clock()))
    }
}
