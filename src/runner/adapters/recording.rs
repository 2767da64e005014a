//! Listener keeping events in memory.

use std::sync::{Arc, Mutex, PoisonError};

use crate::action::error::ActionError;
use crate::runner::domain::TestCase;
use crate::runner::ports::TestListener;

/// A lifecycle event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestEvent {
    /// A test started.
    TestStarted(String),
    /// A test succeeded.
    TestSucceeded(String),
    /// A test failed.
    TestFailed {
        /// The test name.
        test: String,
        /// The rendered failure.
        cause: String,
    },
    /// A test was skipped.
    TestSkipped(String),
    /// A test finished.
    TestFinished(String),
    /// An action started.
    ActionStarted {
        /// The test name.
        test: String,
        /// The action name.
        action: String,
    },
    /// An action finished.
    ActionFinished {
        /// The test name.
        test: String,
        /// The action name.
        action: String,
    },
    /// An action failed.
    ActionFailed {
        /// The test name.
        test: String,
        /// The action name.
        action: String,
        /// The rendered failure.
        cause: String,
    },
    /// An action was skipped.
    ActionSkipped {
        /// The test name.
        test: String,
        /// The action name.
        action: String,
    },
}

/// Records every event in order. Clones share the recording.
#[derive(Debug, Clone, Default)]
pub struct RecordingTestListener {
    events: Arc<Mutex<Vec<TestEvent>>>,
}

impl RecordingTestListener {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The events recorded so far.
    #[must_use]
    pub fn events(&self) -> Vec<TestEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn record(&self, event: TestEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

impl TestListener for RecordingTestListener {
    fn on_test_start(&self, test: &TestCase) {
        self.record(TestEvent::TestStarted(test.name().to_owned()));
    }

    fn on_test_success(&self, test: &TestCase) {
        self.record(TestEvent::TestSucceeded(test.name().to_owned()));
    }

    fn on_test_failure(&self, test: &TestCase, cause: &ActionError) {
        self.record(TestEvent::TestFailed {
            test: test.name().to_owned(),
            cause: cause.to_string(),
        });
    }

    fn on_test_skipped(&self, test: &TestCase) {
        self.record(TestEvent::TestSkipped(test.name().to_owned()));
    }

    fn on_test_finish(&self, test: &TestCase) {
        self.record(TestEvent::TestFinished(test.name().to_owned()));
    }

    fn on_action_start(&self, test: &TestCase, action: &str) {
        self.record(TestEvent::ActionStarted {
            test: test.name().to_owned(),
            action: action.to_owned(),
        });
    }

    fn on_action_finish(&self, test: &TestCase, action: &str) {
        self.record(TestEvent::ActionFinished {
            test: test.name().to_owned(),
            action: action.to_owned(),
        });
    }

    fn on_action_failure(&self, test: &TestCase, action: &str, cause: &ActionError) {
        self.record(TestEvent::ActionFailed {
            test: test.name().to_owned(),
            action: action.to_owned(),
            cause: cause.to_string(),
        });
    }

    fn on_action_skipped(&self, test: &TestCase, action: &str) {
        self.record(TestEvent::ActionSkipped {
            test: test.name().to_owned(),
            action: action.to_owned(),
        });
    }
}
