//! Named storage of messages exchanged during a test.
//!
//! Send and receive actions store every message they handle under a
//! name, so later actions (wait conditions, scripts) can refer back to it.

use crate::message::{domain::Message, error::MessageError};

/// Result type for message store operations.
pub type StoreResult<T> = Result<T, MessageError>;

/// Retains messages by name for the lifetime of a test.
pub trait MessageStore: Send + Sync + std::fmt::Debug {
    /// Stores `message` under `name`, replacing any earlier entry.
    ///
    /// # Errors
    ///
    /// Returns [`MessageError::StoreUnavailable`] if the store cannot be written.
    fn store(&self, name: &str, message: Message) -> StoreResult<()>;

    /// Returns the message stored under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`MessageError::StoreUnavailable`] if the store cannot be read.
    fn get(&self, name: &str) -> StoreResult<Option<Message>>;

    /// Builds the default storage name for a message handled by an action.
    fn construct_message_name(&self, action_name: &str, endpoint_name: &str) -> String {
        format!("{action_name}({endpoint_name})")
    }
}
