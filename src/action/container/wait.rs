//! Blocking until a condition holds.

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;
use tracing::debug;

use crate::action::domain::WaitCondition;
use crate::action::error::{ActionError, ActionResult};
use crate::action::ports::TestAction;
use crate::context::TestContext;
use crate::settings::to_millis;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);

/// Polls a condition every `interval` until it holds, failing with
/// [`ActionError::WaitTimeout`] once `timeout` has elapsed.
#[derive(Debug, Clone)]
pub struct Wait {
    condition: WaitCondition,
    timeout: Duration,
    interval: Duration,
}

impl Wait {
    /// Waits for `condition` with a five second timeout, checking every
    /// second.
    #[must_use]
    pub const fn new(condition: WaitCondition) -> Self {
        Self {
            condition,
            timeout: DEFAULT_TIMEOUT,
            interval: DEFAULT_INTERVAL,
        }
    }

    /// Sets the timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the polling interval.
    #[must_use]
    pub const fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    fn timed_out(&self) -> ActionError {
        ActionError::WaitTimeout {
            condition: self.condition.describe(),
            timeout_ms: to_millis(self.timeout),
        }
    }
}

#[async_trait]
impl TestAction for Wait {
    fn name(&self) -> &'static str {
        "wait"
    }

    async fn execute(&self, context: &TestContext) -> ActionResult<()> {
        let deadline = Instant::now() + self.timeout;
        loop {
            match tokio::time::timeout_at(deadline, self.condition.is_satisfied(context)).await {
                Ok(Ok(true)) => {
                    debug!(condition = %self.condition.describe(), "wait condition satisfied");
                    return Ok(());
                }
                Ok(Ok(false)) => {}
                Ok(Err(err)) => return Err(err),
                Err(_) => return Err(self.timed_out()),
            }

            let now = Instant::now();
            if now >= deadline {
                return Err(self.timed_out());
            }
            tokio::time::sleep_until(deadline.min(now + self.interval)).await;
        }
    }
}
