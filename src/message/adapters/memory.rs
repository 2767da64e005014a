//! In-memory implementation of the `MessageStore` port.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::message::{
    domain::Message,
    error::MessageError,
    ports::store::{MessageStore, StoreResult},
};

/// In-memory implementation of [`MessageStore`].
///
/// Clones share the same underlying map.
///
/// # Example
///
/// ```
/// use caliper::message::adapters::memory::InMemoryMessageStore;
/// use caliper::message::domain::Message;
/// use caliper::message::ports::store::MessageStore;
/// use mockable::DefaultClock;
///
/// let store = InMemoryMessageStore::new();
/// store.store("greeting", Message::new("hello", &DefaultClock)).expect("store");
/// assert!(store.get("greeting").expect("read").is_some());
/// ```
#[derive(Debug, Default, Clone)]
pub struct InMemoryMessageStore {
    messages: Arc<RwLock<HashMap<String, Message>>>,
}

impl InMemoryMessageStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored messages.
    ///
    /// Returns `0` if the internal lock is poisoned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.read().map(|guard| guard.len()).unwrap_or(0)
    }

    /// Returns `true` if no messages are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl MessageStore for InMemoryMessageStore {
    fn store(&self, name: &str, message: Message) -> StoreResult<()> {
        let mut guard = self
            .messages
            .write()
            .map_err(|err| MessageError::StoreUnavailable(err.to_string()))?;
        guard.insert(name.to_owned(), message);
        Ok(())
    }

    fn get(&self, name: &str) -> StoreResult<Option<Message>> {
        let guard = self
            .messages
            .read()
            .map_err(|err| MessageError::StoreUnavailable(err.to_string()))?;
        Ok(guard.get(name).cloned())
    }
}
