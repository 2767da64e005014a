//! Declared payload formats used for validator selection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::message::error::MessageError;

/// Payload format declared on send and receive actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    /// XML documents.
    Xml,
    /// JSON documents.
    Json,
    /// Unstructured text.
    Plaintext,
    /// Raw bytes.
    Binary,
}

impl MessageType {
    /// Returns the canonical lower-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Xml => "xml",
            Self::Json => "json",
            Self::Plaintext => "plaintext",
            Self::Binary => "binary",
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageType {
    type Err = MessageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "xml" => Ok(Self::Xml),
            "json" => Ok(Self::Json),
            "plaintext" | "text" => Ok(Self::Plaintext),
            "binary" | "binary_base64" => Ok(Self::Binary),
            _ => Err(MessageError::UnknownMessageType(s.to_owned())),
        }
    }
}
