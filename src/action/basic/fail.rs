//! Deliberate failure.

use async_trait::async_trait;

use crate::action::error::{ActionError, ActionResult};
use crate::action::ports::TestAction;
use crate::context::TestContext;

/// Fails the test with a message.
#[derive(Debug, Clone)]
pub struct FailAction {
    message: String,
}

impl FailAction {
    /// Fails with `message`; dynamic content is resolved first.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl TestAction for FailAction {
    fn name(&self) -> &'static str {
        "fail"
    }

    async fn execute(&self, context: &TestContext) -> ActionResult<()> {
        let message = context.replace_dynamic_content(&self.message)?;
        Err(ActionError::Failed(message))
    }
}
