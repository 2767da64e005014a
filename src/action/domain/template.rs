//! Declarative messages resolved at execution time.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::context::TestContext;
use crate::context::error::ContextResult;
use crate::message::domain::{Message, Payload};

/// A message as declared in a test, before dynamic content is resolved.
///
/// Text payloads, JSON payloads and header values may contain variables
/// and function calls; [`MessageTemplate::build`] resolves them against
/// the context of the running test.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageTemplate {
    name: Option<String>,
    payload: Payload,
    headers: BTreeMap<String, Value>,
}

impl MessageTemplate {
    /// Creates a template with the given payload.
    #[must_use]
    pub fn new(payload: impl Into<Payload>) -> Self {
        Self {
            payload: payload.into(),
            ..Self::default()
        }
    }

    /// Names the message; the message store uses this name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Adds a header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// The declared message name.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The unresolved payload.
    #[must_use]
    pub const fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Resolves dynamic content and builds the message.
    ///
    /// # Errors
    ///
    /// Propagates variable and function resolution failures.
    pub fn build(&self, context: &TestContext) -> ContextResult<Message> {
        let payload = match &self.payload {
            Payload::Text(text) => Payload::Text(context.replace_dynamic_content(text)?),
            Payload::Json(value) => Payload::Json(context.resolve_dynamic_value(value)?),
            other => other.clone(),
        };
        let headers = self
            .headers
            .iter()
            .map(|(name, value)| Ok((name.clone(), context.resolve_dynamic_value(value)?)))
            .collect::<ContextResult<Vec<_>>>()?;

        let mut builder = Message::builder(payload).with_headers(headers);
        if let Some(name) = &self.name {
            builder = builder.with_name(context.replace_dynamic_content(name)?);
        }
        Ok(builder.build(context.clock()))
    }
}
