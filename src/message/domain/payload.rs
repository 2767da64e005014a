//! Message payload with type-aware conversion.

use std::borrow::Cow;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::message::error::MessageError;

/// Body of a message.
///
/// Conversions between representations are lossless where possible:
/// JSON payloads render as compact JSON text, binary payloads render as
/// standard base64.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum Payload {
    /// No body at all.
    #[default]
    Empty,
    /// Character data (XML, plain text, unparsed JSON).
    Text(String),
    /// Structured JSON document.
    Json(Value),
    /// Raw bytes, serialised as base64.
    Binary(#[serde(with = "base64_bytes")] Vec<u8>),
}

impl Payload {
    /// Creates a text payload.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Creates a JSON payload.
    #[must_use]
    pub const fn json(value: Value) -> Self {
        Self::Json(value)
    }

    /// Creates a binary payload.
    #[must_use]
    pub const fn binary(bytes: Vec<u8>) -> Self {
        Self::Binary(bytes)
    }

    /// Returns `true` if the payload carries no content.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(text) => text.trim().is_empty(),
            Self::Json(_) => false,
            Self::Binary(bytes) => bytes.is_empty(),
        }
    }

    /// Renders the payload as text.
    #[must_use]
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Self::Empty => Cow::Borrowed(""),
            Self::Text(text) => Cow::Borrowed(text.as_str()),
            Self::Json(value) => Cow::Owned(value.to_string()),
            Self::Binary(bytes) => Cow::Owned(STANDARD.encode(bytes)),
        }
    }

    /// Converts the payload into a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`MessageError::EmptyPayload`] for empty payloads and
    /// [`MessageError::InvalidJson`] when the text is not valid JSON.
    pub fn to_json(&self) -> Result<Value, MessageError> {
        match self {
            Self::Empty => Err(MessageError::EmptyPayload),
            Self::Json(value) => Ok(value.clone()),
            Self::Text(text) => serde_json::from_str(text).map_err(MessageError::invalid_json),
            Self::Binary(bytes) => {
                serde_json::from_slice(bytes).map_err(MessageError::invalid_json)
            }
        }
    }

    /// Returns the payload as bytes.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Self::Binary(bytes) => bytes.clone(),
            other => other.as_text().into_owned().into_bytes(),
        }
    }

    /// Returns the first non-whitespace character of the textual form.
    #[must_use]
    pub fn leading_char(&self) -> Option<char> {
        match self {
            Self::Empty | Self::Binary(_) => None,
            Self::Json(value) => match value {
                Value::Object(_) => Some('{'),
                Value::Array(_) => Some('['),
                _ => value.to_string().chars().next(),
            },
            Self::Text(text) => text.trim_start().chars().next(),
        }
    }
}

impl From<&str> for Payload {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for Payload {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

impl From<Vec<u8>> for Payload {
    fn from(value: Vec<u8>) -> Self {
        Self::Binary(value)
    }
}

mod base64_bytes {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}
