//! Test lifecycle notifications.

use crate::action::error::ActionError;
use crate::runner::domain::TestCase;

/// Observes test and action lifecycle events.
///
/// Every method has an empty default, so listeners implement only the
/// events they care about. Listeners are called synchronously from the
/// runner and must not block.
pub trait TestListener: Send + Sync {
    /// A test is about to run.
    fn on_test_start(&self, _test: &TestCase) {}

    /// A test succeeded.
    fn on_test_success(&self, _test: &TestCase) {}

    /// A test failed with `cause`.
    fn on_test_failure(&self, _test: &TestCase, _cause: &ActionError) {}

    /// A disabled test was skipped.
    fn on_test_skipped(&self, _test: &TestCase) {}

    /// A test finished, whatever its outcome.
    fn on_test_finish(&self, _test: &TestCase) {}

    /// A top-level action is about to run.
    fn on_action_start(&self, _test: &TestCase, _action: &str) {}

    /// A top-level action completed successfully.
    fn on_action_finish(&self, _test: &TestCase, _action: &str) {}

    /// A top-level action failed. Always paired with an earlier start.
    fn on_action_failure(&self, _test: &TestCase, _action: &str, _cause: &ActionError) {}

    /// A disabled top-level action was skipped.
    fn on_action_skipped(&self, _test: &TestCase, _action: &str) {}
}
