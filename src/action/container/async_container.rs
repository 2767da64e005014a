//! Forked execution.

use async_trait::async_trait;
use tracing::{debug, warn};

use super::ActionList;
use crate::action::error::ActionResult;
use crate::action::ports::{TestAction, TestActionBuilder};
use crate::context::TestContext;

/// Runs its actions on a background task and returns immediately.
///
/// The task is registered with the context. Its failure, and failures of
/// the callbacks, are recorded as context exceptions and surface at the
/// next join point or when the test finishes.
#[derive(Debug, Clone, Default)]
pub struct AsyncContainer {
    actions: ActionList,
    on_success: ActionList,
    on_error: ActionList,
}

impl AsyncContainer {
    /// Creates an empty container.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            actions: ActionList::new(),
            on_success: ActionList::new(),
            on_error: ActionList::new(),
        }
    }

    /// Adds an action to the forked body.
    #[must_use]
    pub fn with_action(mut self, action: impl TestActionBuilder + 'static) -> Self {
        self.actions.push(action);
        self
    }

    /// Adds an action run after the body succeeded.
    #[must_use]
    pub fn on_success(mut self, action: impl TestActionBuilder + 'static) -> Self {
        self.on_success.push(action);
        self
    }

    /// Adds an action run after the body failed.
    #[must_use]
    pub fn on_error(mut self, action: impl TestActionBuilder + 'static) -> Self {
        self.on_error.push(action);
        self
    }
}

async fn run_forked(container: AsyncContainer, context: TestContext) {
    match container.actions.run(&context).await {
        Ok(()) => {
            debug!("async actions finished");
            if let Err(err) = container.on_success.run(&context).await {
                context.add_exception(err);
            }
        }
        Err(err) => {
            warn!(error = %err, "async actions failed");
            if let Err(callback_err) = container.on_error.run(&context).await {
                context.add_exception(callback_err);
            }
            context.add_exception(err);
        }
    }
}

#[async_trait]
impl TestAction for AsyncContainer {
    fn name(&self) -> &'static str {
        "async"
    }

    async fn execute(&self, context: &TestContext) -> ActionResult<()> {
        let handle = tokio::spawn(run_forked(self.clone(), context.clone()));
        context.register_fork(handle);
        Ok(())
    }
}
