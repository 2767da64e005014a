//! Sequential execution.

use async_trait::async_trait;

use super::ActionList;
use crate::action::error::ActionResult;
use crate::action::ports::{TestAction, TestActionBuilder};
use crate::context::TestContext;

/// Runs its actions in declaration order; the first failure aborts the
/// remaining actions.
#[derive(Debug, Clone, Default)]
pub struct Sequence {
    actions: ActionList,
}

impl Sequence {
    /// Creates an empty sequence.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            actions: ActionList::new(),
        }
    }

    /// Appends an action.
    #[must_use]
    pub fn with_action(mut self, action: impl TestActionBuilder + 'static) -> Self {
        self.actions.push(action);
        self
    }

    /// The child actions.
    #[must_use]
    pub const fn actions(&self) -> &ActionList {
        &self.actions
    }
}

impl From<ActionList> for Sequence {
    fn from(actions: ActionList) -> Self {
        Self { actions }
    }
}

#[async_trait]
impl TestAction for Sequence {
    fn name(&self) -> &'static str {
        "sequential"
    }

    async fn execute(&self, context: &TestContext) -> ActionResult<()> {
        self.actions.run(context).await
    }
}
