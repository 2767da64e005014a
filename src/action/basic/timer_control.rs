//! Stopping timers.

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::action::error::ActionResult;
use crate::action::ports::TestAction;
use crate::context::TestContext;

/// Stops one timer, or every timer when no id is set.
#[derive(Debug, Clone, Default)]
pub struct StopTimerAction {
    timer_id: Option<String>,
}

impl StopTimerAction {
    /// Stops the timer `timer_id`.
    #[must_use]
    pub fn new(timer_id: impl Into<String>) -> Self {
        Self {
            timer_id: Some(timer_id.into()),
        }
    }

    /// Stops all timers.
    #[must_use]
    pub const fn all() -> Self {
        Self { timer_id: None }
    }
}

#[async_trait]
impl TestAction for StopTimerAction {
    fn name(&self) -> &'static str {
        "stop-timer"
    }

    async fn execute(&self, context: &TestContext) -> ActionResult<()> {
        match &self.timer_id {
            Some(id) => {
                let resolved = context.replace_dynamic_content(id)?;
                if context.stop_timer(&resolved) {
                    debug!(timer = %resolved, "stopped timer");
                } else {
                    warn!(timer = %resolved, "no running timer to stop");
                }
            }
            None => context.stop_timers(),
        }
        Ok(())
    }
}
