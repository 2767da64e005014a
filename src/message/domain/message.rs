//! The message envelope.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{MessageId, Payload};

/// A message sent to or received from an endpoint.
///
/// # Invariants
///
/// - `id` and `timestamp` are assigned at construction and never change
/// - header names are unique
/// - copies made with [`Message::copy_of`] get their own identity
///
/// # Examples
///
/// ```
/// use caliper::message::domain::{Message, Payload};
/// use mockable::DefaultClock;
/// use serde_json::json;
///
/// let message = Message::builder(Payload::json(json!({"id": 1})))
///     .with_name("order")
///     .with_header("priority", json!(3))
///     .build(&DefaultClock);
///
/// assert_eq!(message.name(), Some("order"));
/// assert_eq!(message.header("priority"), Some(&json!(3)));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    id: MessageId,
    name: Option<String>,
    payload: Payload,
    headers: BTreeMap<String, Value>,
    timestamp: DateTime<Utc>,
}

impl Message {
    /// Creates a message with no headers.
    #[must_use]
    pub fn new(payload: impl Into<Payload>, clock: &(impl Clock + ?Sized)) -> Self {
        Self::builder(payload).build(clock)
    }

    /// Starts building a message around `payload`.
    #[must_use]
    pub fn builder(payload: impl Into<Payload>) -> MessageBuilder {
        MessageBuilder::new(payload)
    }

    /// Copy-constructs a message from `other`.
    ///
    /// The copy inherits name, payload and headers but receives a fresh
    /// identifier and timestamp.
    #[must_use]
    pub fn copy_of(other: &Self, clock: &(impl Clock + ?Sized)) -> Self {
        Self {
            id: MessageId::new(),
            name: other.name.clone(),
            payload: other.payload.clone(),
            headers: other.headers.clone(),
            timestamp: clock.utc(),
        }
    }

    /// Returns the message identifier.
    #[must_use]
    pub const fn id(&self) -> MessageId {
        self.id
    }

    /// Returns the optional message name.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the payload.
    #[must_use]
    pub const fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Returns all headers.
    #[must_use]
    pub const fn headers(&self) -> &BTreeMap<String, Value> {
        &self.headers
    }

    /// Returns a single header value.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&Value> {
        self.headers.get(name)
    }

    /// Returns a header value rendered as text.
    ///
    /// String values are returned without JSON quoting.
    #[must_use]
    pub fn header_text(&self, name: &str) -> Option<String> {
        self.headers.get(name).map(value_text)
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Returns this message with an added or replaced header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: Value) -> Self {
        self.headers.insert(name.into(), value);
        self
    }

    /// Returns this message with `payload` replacing the current body.
    #[must_use]
    pub fn with_payload(mut self, payload: impl Into<Payload>) -> Self {
        self.payload = payload.into();
        self
    }

    /// Returns this message with the given name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Renders a JSON value as plain text, leaving strings unquoted.
#[must_use]
pub(crate) fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Builder for [`Message`].
#[derive(Debug, Clone)]
pub struct MessageBuilder {
    id: Option<MessageId>,
    name: Option<String>,
    payload: Payload,
    headers: BTreeMap<String, Value>,
}

impl MessageBuilder {
    /// Creates a builder for the given payload.
    #[must_use]
    pub fn new(payload: impl Into<Payload>) -> Self {
        Self {
            id: None,
            name: None,
            payload: payload.into(),
            headers: BTreeMap::new(),
        }
    }

    /// Uses a fixed identifier instead of a random one.
    #[must_use]
    pub const fn with_id(mut self, id: MessageId) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the message name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Adds a header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: Value) -> Self {
        self.headers.insert(name.into(), value);
        self
    }

    /// Adds all headers from `headers`.
    #[must_use]
    pub fn with_headers(mut self, headers: impl IntoIterator<Item = (String, Value)>) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Builds the message, stamping it with the clock's current time.
    #[must_use]
    pub fn build(self, clock: &(impl Clock + ?Sized)) -> Message {
        Message {
            id: self.id.unwrap_or_default(),
            name: self.name,
            payload: self.payload,
            headers: self.headers,
            timestamp: clock.utc(),
        }
    }
}
