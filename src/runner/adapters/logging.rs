//! Listener writing lifecycle events to `tracing`.

use tracing::{debug, error, info};

use crate::action::error::ActionError;
use crate::runner::domain::TestCase;
use crate::runner::ports::TestListener;

/// Logs test outcomes at `info`/`error` and action events at `debug`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingTestListener;

impl TestListener for LoggingTestListener {
    fn on_test_start(&self, test: &TestCase) {
        info!(test = test.name(), package = test.package(), "test started");
    }

    fn on_test_success(&self, test: &TestCase) {
        info!(test = test.name(), "test succeeded");
    }

    fn on_test_failure(&self, test: &TestCase, cause: &ActionError) {
        error!(test = test.name(), kind = %cause.kind(), error = %cause, "test failed");
    }

    fn on_test_skipped(&self, test: &TestCase) {
        info!(test = test.name(), "test skipped");
    }

    fn on_action_start(&self, test: &TestCase, action: &str) {
        debug!(test = test.name(), action, "action started");
    }

    fn on_action_finish(&self, test: &TestCase, action: &str) {
        debug!(test = test.name(), action, "action finished");
    }

    fn on_action_failure(&self, test: &TestCase, action: &str, cause: &ActionError) {
        debug!(test = test.name(), action, error = %cause, "action failed");
    }

    fn on_action_skipped(&self, test: &TestCase, action: &str) {
        debug!(test = test.name(), action, "action skipped");
    }
}
