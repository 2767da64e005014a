//! Test action contracts.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::action::error::ActionResult;
use crate::context::TestContext;

/// One step of a test.
///
/// Actions hold their configuration only; everything that changes while
/// a test runs lives in the [`TestContext`], so one action instance can
/// run in several tests at once.
#[async_trait]
pub trait TestAction: Send + Sync + fmt::Debug {
    /// Action name for logs and reports.
    fn name(&self) -> &str;

    /// Returns `true` if the action must be skipped, for example because
    /// its endpoint belongs to a disabled actor.
    fn is_disabled(&self, _context: &TestContext) -> bool {
        false
    }

    /// Runs the action.
    ///
    /// # Errors
    ///
    /// Returns an [`crate::action::error::ActionError`] describing why the
    /// step failed.
    async fn execute(&self, context: &TestContext) -> ActionResult<()>;
}

/// Produces actions on demand.
///
/// Containers keep builders rather than actions and build their children
/// when they execute.
pub trait TestActionBuilder: Send + Sync + fmt::Debug {
    /// Builds the action.
    fn build(&self) -> Arc<dyn TestAction>;
}

impl<A> TestActionBuilder for A
where
    A: TestAction + Clone + 'static,
{
    fn build(&self) -> Arc<dyn TestAction> {
        Arc::new(self.clone())
    }
}
