//! Counting loops.

use async_trait::async_trait;
use tracing::debug;

use super::{ActionList, DEFAULT_INDEX_NAME};
use crate::action::domain::LoopCondition;
use crate::action::error::{ActionError, ActionResult};
use crate::action::ports::{TestAction, TestActionBuilder};
use crate::context::TestContext;

/// Runs its actions while a condition over the index holds.
///
/// The index starts at `start`, is stored in the index variable before
/// each pass and grows by `step` after it.
#[derive(Debug, Clone)]
pub struct Iterate {
    condition: LoopCondition,
    index_name: String,
    start: u64,
    step: u64,
    actions: ActionList,
}

impl Iterate {
    /// Iterates while `condition` holds, with index `i` from 1 in steps
    /// of 1.
    #[must_use]
    pub fn new(condition: LoopCondition) -> Self {
        Self {
            condition,
            index_name: DEFAULT_INDEX_NAME.to_owned(),
            start: 1,
            step: 1,
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

    /// Sets the index increment.
    #[must_use]
    pub const fn with_step(mut self, step: u64) -> Self {
        self.step = step;
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
impl TestAction for Iterate {
    fn name(&self) -> &'static str {
        "iterate"
    }

    async fn execute(&self, context: &TestContext) -> ActionResult<()> {
        if self.step == 0 {
            return Err(ActionError::configuration("iterate step must be positive"));
        }
        let mut index = self.start;
        while self.condition.evaluate(&self.index_name, index, context)? {
            debug!(index, "iteration");
            context.set_variable(&self.index_name, index.to_string())?;
            self.actions.run(context).await?;
            index = index.saturating_add(self.step);
        }
        Ok(())
    }
}
