//! Test and suite results.

use std::time::Duration;

use crate::action::error::ActionError;

/// How a test ended.
#[derive(Debug, Clone, PartialEq)]
pub enum TestOutcome {
    /// Every action and final action succeeded.
    Success,
    /// The test failed; the root cause is attached.
    Failed(ActionError),
    /// The test was disabled and did not run.
    Skipped,
}

/// Result of one test execution.
#[derive(Debug, Clone, PartialEq)]
pub struct TestResult {
    name: String,
    package: String,
    outcome: TestOutcome,
    duration: Duration,
    parameters: Vec<(String, String)>,
}

impl TestResult {
    /// Creates a result.
    #[must_use]
    pub fn new(name: impl Into<String>, package: impl Into<String>, outcome: TestOutcome) -> Self {
        Self {
            name: name.into(),
            package: package.into(),
            outcome,
            duration: Duration::ZERO,
            parameters: Vec::new(),
        }
    }

    /// Records the execution time.
    #[must_use]
    pub const fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Records the parameters the test ran with.
    #[must_use]
    pub fn with_parameters(mut self, parameters: Vec<(String, String)>) -> Self {
        self.parameters = parameters;
        self
    }

    /// The test name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The test package.
    #[must_use]
    pub fn package(&self) -> &str {
        &self.package
    }

    /// The outcome.
    #[must_use]
    pub const fn outcome(&self) -> &TestOutcome {
        &self.outcome
    }

    /// Time spent running the test.
    #[must_use]
    pub const fn duration(&self) -> Duration {
        self.duration
    }

    /// The parameters.
    #[must_use]
    pub fn parameters(&self) -> &[(String, String)] {
        &self.parameters
    }

    /// Returns `true` for successful tests.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.outcome, TestOutcome::Success)
    }

    /// Returns `true` for failed tests.
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self.outcome, TestOutcome::Failed(_))
    }

    /// Returns `true` for skipped tests.
    #[must_use]
    pub const fn is_skipped(&self) -> bool {
        matches!(self.outcome, TestOutcome::Skipped)
    }

    /// The failure cause, if the test failed.
    #[must_use]
    pub const fn cause(&self) -> Option<&ActionError> {
        match &self.outcome {
            TestOutcome::Failed(cause) => Some(cause),
            TestOutcome::Success | TestOutcome::Skipped => None,
        }
    }
}

/// Results of a suite run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SuiteResult {
    results: Vec<TestResult>,
    duration: Duration,
    after_suite_failure: Option<ActionError>,
}

impl SuiteResult {
    pub(crate) const fn new(
        results: Vec<TestResult>,
        duration: Duration,
        after_suite_failure: Option<ActionError>,
    ) -> Self {
        Self {
            results,
            duration,
            after_suite_failure,
        }
    }

    /// Results in execution order.
    #[must_use]
    pub fn results(&self) -> &[TestResult] {
        &self.results
    }

    /// Time spent running the suite.
    #[must_use]
    pub const fn duration(&self) -> Duration {
        self.duration
    }

    /// Failure of the after-suite hooks, if any.
    #[must_use]
    pub const fn after_suite_failure(&self) -> Option<&ActionError> {
        self.after_suite_failure.as_ref()
    }

    /// Number of tests.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.results.len()
    }

    /// Number of successful tests.
    #[must_use]
    pub fn passed(&self) -> usize {
        self.results.iter().filter(|result| result.is_success()).count()
    }

    /// Number of failed tests.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.results.iter().filter(|result| result.is_failed()).count()
    }

    /// Number of skipped tests.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.results.iter().filter(|result| result.is_skipped()).count()
    }

    /// Returns `true` when no test and no after-suite hook failed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed() == 0 && self.after_suite_failure.is_none()
    }
}
