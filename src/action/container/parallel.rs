//! Concurrent execution with join-all semantics.

use async_trait::async_trait;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use super::{ActionList, run_action};
use crate::action::error::{ActionError, ActionResult};
use crate::action::ports::{TestAction, TestActionBuilder};
use crate::context::TestContext;

/// Runs every action on its own task and waits for all of them.
///
/// A failing child never cancels its siblings: the container completes
/// once every child has finished and then reports all failures together.
#[derive(Debug, Clone, Default)]
pub struct Parallel {
    actions: ActionList,
}

impl Parallel {
    /// Creates an empty container.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            actions: ActionList::new(),
        }
    }

    /// Adds an action.
    #[must_use]
    pub fn with_action(mut self, action: impl TestActionBuilder + 'static) -> Self {
        self.actions.push(action);
        self
    }
}

#[async_trait]
impl TestAction for Parallel {
    fn name(&self) -> &'static str {
        "parallel"
    }

    async fn execute(&self, context: &TestContext) -> ActionResult<()> {
        let mut tasks = JoinSet::new();
        for builder in self.actions.iter() {
            let action = builder.build();
            let child_context = context.clone();
            tasks.spawn(async move { run_action(action.as_ref(), &child_context).await });
        }

        let mut failures = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Ok(())) => {}
                Ok(Err(err)) => {
                    warn!(error = %err, "parallel action failed");
                    failures.push(err);
                }
                Err(err) => failures.push(ActionError::execution("parallel", err.to_string())),
            }
        }
        debug!(
            actions = self.actions.len(),
            failed = failures.len(),
            "parallel actions finished"
        );
        ActionError::aggregate(failures)
    }
}
