//! Error types for payload conversion and message storage.

use thiserror::Error;

/// Errors raised while converting payloads or accessing stored messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessageError {
    /// The payload has no content to convert.
    #[error("message payload is empty")]
    EmptyPayload,

    /// The payload is not a valid JSON document.
    #[error("payload is not valid JSON: {0}")]
    InvalidJson(String),

    /// The message type name is not known.
    #[error("unknown message type '{0}'")]
    UnknownMessageType(String),

    /// The message store lock was poisoned by a panicking writer.
    #[error("message store unavailable: {0}")]
    StoreUnavailable(String),
}

impl MessageError {
    /// Wraps a JSON parse failure.
    #[must_use]
    pub fn invalid_json(err: serde_json::Error) -> Self {
        Self::InvalidJson(err.to_string())
    }
}
