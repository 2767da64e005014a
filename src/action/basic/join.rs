//! Join point for forked actions.

use std::time::Duration;

use async_trait::async_trait;

use crate::action::error::{ActionError, ActionResult};
use crate::action::ports::TestAction;
use crate::context::TestContext;

/// Waits for all forked actions and raises their failures.
#[derive(Debug, Clone, Default)]
pub struct JoinAsyncAction {
    timeout: Option<Duration>,
}

impl JoinAsyncAction {
    /// Joins within the configured async completion timeout.
    #[must_use]
    pub const fn new() -> Self {
        Self { timeout: None }
    }

    /// Joins within `timeout`.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

#[async_trait]
impl TestAction for JoinAsyncAction {
    fn name(&self) -> &'static str {
        "join-async"
    }

    async fn execute(&self, context: &TestContext) -> ActionResult<()> {
        let timeout = self
            .timeout
            .unwrap_or_else(|| context.settings().async_completion_timeout());
        context.join_forks(timeout).await?;

        ActionError::aggregate(context.take_exceptions())
    }
}
