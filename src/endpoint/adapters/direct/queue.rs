//! Named in-memory message queue.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use tokio::sync::{Notify, oneshot};
use tokio::time::{Instant, timeout_at};

use crate::endpoint::error::{EndpointError, EndpointResult};
use crate::message::domain::Message;

use super::MessageSelector;

/// A queued message with its optional reply channel.
#[derive(Debug)]
pub(crate) struct QueuedMessage {
    pub(crate) message: Message,
    pub(crate) reply_to: Option<oneshot::Sender<Message>>,
}

/// FIFO queue shared by every endpoint bound to the same name.
#[derive(Debug)]
pub struct MessageQueue {
    name: String,
    entries: Mutex<VecDeque<QueuedMessage>>,
    notify: Notify,
}

impl MessageQueue {
    /// Creates an empty queue.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Mutex::new(VecDeque::new()),
            notify: Notify::new(),
        }
    }

    /// Queue name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Appends a message without reply channel.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointError::LockPoisoned`] if the queue lock is poisoned.
    pub fn push(&self, message: Message) -> EndpointResult<()> {
        self.enqueue(QueuedMessage {
            message,
            reply_to: None,
        })
    }

    pub(crate) fn enqueue(&self, entry: QueuedMessage) -> EndpointResult<()> {
        self.entries
            .lock()
            .map_err(EndpointError::poisoned)?
            .push_back(entry);
        self.notify.notify_waiters();
        Ok(())
    }

    /// Number of waiting messages.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointError::LockPoisoned`] if the queue lock is poisoned.
    pub fn len(&self) -> EndpointResult<usize> {
        Ok(self.entries.lock().map_err(EndpointError::poisoned)?.len())
    }

    /// Returns `true` if no message is waiting.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointError::LockPoisoned`] if the queue lock is poisoned.
    pub fn is_empty(&self) -> EndpointResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Drops every waiting message and returns how many were removed.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointError::LockPoisoned`] if the queue lock is poisoned.
    pub fn purge(&self) -> EndpointResult<usize> {
        let mut entries = self.entries.lock().map_err(EndpointError::poisoned)?;
        let removed = entries.len();
        entries.clear();
        Ok(removed)
    }

    /// Waits up to `timeout` for the first message accepted by `selector`.
    pub(crate) async fn pop(
        &self,
        selector: Option<&MessageSelector>,
        timeout: Duration,
    ) -> EndpointResult<Option<QueuedMessage>> {
        let deadline = Instant::now() + timeout;
        loop {
            let notified = self.notify.notified();
            if let Some(entry) = self.take_matching(selector)? {
                return Ok(Some(entry));
            }
            if timeout_at(deadline, notified).await.is_err() {
                return Ok(None);
            }
        }
    }

    fn take_matching(
        &self,
        selector: Option<&MessageSelector>,
    ) -> EndpointResult<Option<QueuedMessage>> {
        let mut entries = self.entries.lock().map_err(EndpointError::poisoned)?;
        let position = entries
            .iter()
            .position(|entry| selector.is_none_or(|s| s.matches(&entry.message)));
        Ok(position.and_then(|index| entries.remove(index)))
    }
}
