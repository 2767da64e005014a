//! Log output.

use async_trait::async_trait;
use tracing::info;

use crate::action::error::ActionResult;
use crate::action::ports::TestAction;
use crate::context::TestContext;

/// Logs a message, or the current time when no message is set.
#[derive(Debug, Clone, Default)]
pub struct EchoAction {
    message: Option<String>,
}

impl EchoAction {
    /// Logs `message` after resolving its dynamic content.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }

    /// Logs the current time.
    #[must_use]
    pub const fn time() -> Self {
        Self { message: None }
    }
}

#[async_trait]
impl TestAction for EchoAction {
    fn name(&self) -> &'static str {
        "echo"
    }

    async fn execute(&self, context: &TestContext) -> ActionResult<()> {
        match &self.message {
            Some(message) => {
                let text = context.replace_dynamic_content(message)?;
                info!(action = "echo", "{text}");
            }
            None => info!(action = "echo", "{}", context.clock().utc().to_rfc3339()),
        }
        Ok(())
    }
}
