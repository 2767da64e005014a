//! Conditions polled by the `wait` container.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use super::ContextPredicate;
use crate::action::error::{ActionError, ActionResult};
use crate::action::ports::TestActionBuilder;
use crate::context::TestContext;

/// Something the `wait` container polls until it holds.
#[derive(Clone)]
pub enum WaitCondition {
    /// A message with this name is in the message store.
    MessageStored(String),
    /// A file exists at this path. The path may contain variables.
    FileExists(String),
    /// The action runs without failing.
    Action(Arc<dyn TestActionBuilder>),
    /// A named closure returns `true`.
    Custom {
        /// Name used in logs and timeout errors.
        name: String,
        /// The predicate.
        predicate: ContextPredicate,
    },
}

impl WaitCondition {
    /// Wraps a closure.
    #[must_use]
    pub fn custom<F>(name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&TestContext) -> bool + Send + Sync + 'static,
    {
        Self::Custom {
            name: name.into(),
            predicate: Arc::new(predicate),
        }
    }

    /// Describes the condition for logs and errors.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::MessageStored(name) => format!("message '{name}' stored"),
            Self::FileExists(path) => format!("file '{path}' exists"),
            Self::Action(builder) => format!("action '{}' succeeds", builder.build().name()),
            Self::Custom { name, .. } => name.clone(),
        }
    }

    /// Checks the condition once.
    ///
    /// # Errors
    ///
    /// Returns resolution failures and unreadable message stores. A
    /// failing condition action is reported as `Ok(false)`.
    pub async fn is_satisfied(&self, context: &TestContext) -> ActionResult<bool> {
        match self {
            Self::MessageStored(name) => {
                let resolved = context.replace_dynamic_content(name)?;
                let stored = context
                    .message_store()
                    .get(&resolved)
                    .map_err(|err| ActionError::execution("wait", err.to_string()))?;
                Ok(stored.is_some())
            }
            Self::FileExists(path) => {
                let resolved = context.replace_dynamic_content(path)?;
                Ok(tokio::fs::try_exists(&resolved).await.unwrap_or(false))
            }
            Self::Action(builder) => {
                let action = builder.build();
                match action.execute(context).await {
                    Ok(()) => Ok(true),
                    Err(err) => {
                        debug!(action = action.name(), error = %err, "wait condition action failed");
                        Ok(false)
                    }
                }
            }
            Self::Custom { predicate, .. } => Ok(predicate(context)),
        }
    }
}

impl fmt::Debug for WaitCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("WaitCondition").field(&self.describe()).finish()
    }
}
