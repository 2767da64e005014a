//! Adapter routing requests by header value.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::context::TestContext;
use crate::endpoint::error::{EndpointError, EndpointResult};
use crate::endpoint::ports::EndpointAdapter;
use crate::message::domain::Message;

/// Dispatches each request to the adapter mapped to one of its headers.
#[derive(Debug, Clone)]
pub struct RequestDispatchingEndpointAdapter {
    header: String,
    mappings: BTreeMap<String, Arc<dyn EndpointAdapter>>,
    fallback: Option<Arc<dyn EndpointAdapter>>,
}

impl RequestDispatchingEndpointAdapter {
    /// Creates an adapter keyed on `header`.
    #[must_use]
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            mappings: BTreeMap::new(),
            fallback: None,
        }
    }

    /// Maps a header value to an adapter.
    #[must_use]
    pub fn with_mapping(mut self, key: impl Into<String>, adapter: Arc<dyn EndpointAdapter>) -> Self {
        self.mappings.insert(key.into(), adapter);
        self
    }

    /// Sets the adapter used when no mapping matches.
    #[must_use]
    pub fn with_fallback(mut self, adapter: Arc<dyn EndpointAdapter>) -> Self {
        self.fallback = Some(adapter);
        self
    }
}

#[async_trait]
impl EndpointAdapter for RequestDispatchingEndpointAdapter {
    async fn handle_message(&self, request: Message, context: &TestContext) -> EndpointResult<Message> {
        let key = request.header_text(&self.header).unwrap_or_default();
        let adapter = self
            .mappings
            .get(&key)
            .or(self.fallback.as_ref())
            .ok_or_else(|| EndpointError::NoAdapterMapping(key.clone()))?;
        debug!(header = %self.header, key, "dispatching request");
        adapter.handle_message(request, context).await
    }
}
