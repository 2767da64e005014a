//! Fixed delays.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::action::error::{ActionError, ActionResult};
use crate::action::ports::TestAction;
use crate::context::TestContext;
use crate::settings::to_millis;

#[derive(Debug, Clone)]
enum Delay {
    Fixed(Duration),
    Millis(String),
}

/// Suspends the test for a duration.
#[derive(Debug, Clone)]
pub struct SleepAction {
    delay: Delay,
}

impl SleepAction {
    /// Sleeps for `duration`.
    #[must_use]
    pub const fn new(duration: Duration) -> Self {
        Self {
            delay: Delay::Fixed(duration),
        }
    }

    /// Sleeps for the milliseconds given by `expression`, which may be a
    /// variable such as `${pause}`.
    #[must_use]
    pub fn millis(expression: impl Into<String>) -> Self {
        Self {
            delay: Delay::Millis(expression.into()),
        }
    }

    fn duration(&self, context: &TestContext) -> ActionResult<Duration> {
        match &self.delay {
            Delay::Fixed(duration) => Ok(*duration),
            Delay::Millis(expression) => {
                let resolved = context.replace_dynamic_content(expression)?;
                resolved
                    .trim()
                    .parse::<u64>()
                    .map(Duration::from_millis)
                    .map_err(|_| ActionError::configuration(format!("invalid sleep time '{resolved}'")))
            }
        }
    }
}

#[async_trait]
impl TestAction for SleepAction {
    fn name(&self) -> &'static str {
        "sleep"
    }

    async fn execute(&self, context: &TestContext) -> ActionResult<()> {
        let duration = self.duration(context)?;
        debug!(millis = to_millis(duration), "sleeping");
        tokio::time::sleep(duration).await;
        Ok(())
    }
}
