//! Repeating loops.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::{ActionList, DEFAULT_INDEX_NAME};
use crate::action::domain::LoopCondition;
use crate::action::error::{ActionError, ActionResult};
use crate::action::ports::{TestAction, TestActionBuilder};
use crate::context::TestContext;

/// Runs its actions at least once and repeats until the condition
/// holds. The condition sees the index after it was incremented.
#[derive(Debug, Clone)]
pub struct RepeatUntilTrue {
    condition: LoopCondition,
    index_name: String,
    start: u64,
    actions: ActionList,
}

impl RepeatUntilTrue {
    /// Repeats until `condition` holds, with index `i` from 1.
    #[must_use]
    pub fn new(condition: LoopCondition) -> Self {
        Self {
            condition,
            index_name: DEFAULT_INDEX_NAME.to_owned(),
            start: 1,
            actions: ActionList::new(),
        }
    }

    /// Renames the index variable.
    #[must_use]
    pub fn with_index_name(mut self, index_name: impl Into<String>) -> Self {
        self.index_name = index_name.into();
        self
    }

    /// Sets the first index.
    #[must_use]
    pub const fn starting_at(mut self, start: u64) -> Self {
        self.start = start;
        self
    }

    /// Adds an action to the loop body.
    #[must_use]
    pub fn with_action(mut self, action: impl TestActionBuilder + 'static) -> Self {
        self.actions.push(action);
        self
    }
}

#[async_trait]
impl TestAction for RepeatUntilTrue {
    fn name(&self) -> &'static str {
        "repeat"
    }

    async fn execute(&self, context: &TestContext) -> ActionResult<()> {
        let mut index = self.start;
        loop {
            context.set_variable(&self.index_name, index.to_string())?;
            self.actions.run(context).await?;
            index = index.saturating_add(1);
            if self.condition.evaluate(&self.index_name, index, context)? {
                return Ok(());
            }
        }
    }
}

/// Retries its actions after a failure until they succeed or the
/// condition holds.
///
/// Each failed pass increments the index and sleeps for `auto_sleep`.
/// When the condition ends the loop while the last pass failed, that
/// failure is raised.
#[derive(Debug, Clone)]
pub struct RepeatOnErrorUntilTrue {
    condition: LoopCondition,
    index_name: String,
    start: u64,
    auto_sleep: Duration,
    actions: ActionList,
}

impl RepeatOnErrorUntilTrue {
    /// Retries until `condition` holds, with index `i` from 1 and a one
    /// second pause between attempts.
    #[must_use]
    pub fn new(condition: LoopCondition) -> Self {
        Self {
            condition,
            index_name: DEFAULT_INDEX_NAME.to_owned(),
            start: 1,
            auto_sleep: Duration::from_secs(1),
            actions: ActionList::new(),
        }
    }

    /// Renames the index variable.
    #[must_use]
    pub fn with_index_name(mut self, index_name: impl Into<String>) -> Self {
        self.index_name = index_name.into();
        self
    }

    /// Sets the first index.
    #[must_use]
    pub const fn starting_at(mut self, start: u64) -> Self {
        self.start = start;
        self
    }

    /// Sets the pause after a failed attempt.
    #[must_use]
    pub const fn with_auto_sleep(mut self, auto_sleep: Duration) -> Self {
        self.auto_sleep = auto_sleep;
        self
    }

    /// Adds an action to the loop body.
    #[must_use]
    pub fn with_action(mut self, action: impl TestActionBuilder + 'static) -> Self {
        self.actions.push(action);
        self
    }
}

#[async_trait]
impl TestAction for RepeatOnErrorUntilTrue {
    fn name(&self) -> &'static str {
        "repeat-on-error"
    }

    async fn execute(&self, context: &TestContext) -> ActionResult<()> {
        let mut index = self.start;
        let mut last_failure: Option<ActionError> = None;
        while !self.condition.evaluate(&self.index_name, index, context)? {
            context.set_variable(&self.index_name, index.to_string())?;
            match self.actions.run(context).await {
                Ok(()) => {
                    debug!(attempt = index, "repeated actions succeeded");
                    last_failure = None;
                    break;
                }
                Err(err) => {
                    warn!(attempt = index, error = %err, "repeated actions failed");
                    last_failure = Some(err);
                    tokio::time::sleep(self.auto_sleep).await;
                    index = index.saturating_add(1);
                }
            }
        }
        last_failure.map_or(Ok(()), |err| {
            info!("all retries failed");
            Err(err)
        })
    }
}
