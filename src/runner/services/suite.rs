//! Runs groups of test cases.

use std::collections::BTreeSet;

use tokio::time::Instant;
use tracing::{error, info, warn};

use super::TestCaseRunner;
use crate::action::error::ActionResult;
use crate::context::TestContext;
use crate::runner::domain::{Hook, SuiteResult, TestCase, TestOutcome, TestResult};

/// Runs tests one after another between suite hooks.
///
/// When a before-suite hook fails, no test runs and every test is
/// reported as failed with that cause. After-suite hooks always run;
/// their first failure is kept on the [`SuiteResult`].
#[derive(Clone)]
pub struct TestSuite {
    name: String,
    runner: TestCaseRunner,
    before_suite: Vec<Hook>,
    after_suite: Vec<Hook>,
}

impl TestSuite {
    /// Creates a suite running tests with `runner`.
    #[must_use]
    pub fn new(name: impl Into<String>, runner: TestCaseRunner) -> Self {
        Self {
            name: name.into(),
            runner,
            before_suite: Vec::new(),
            after_suite: Vec::new(),
        }
    }

    /// Adds a before-suite hook.
    #[must_use]
    pub fn with_before_suite(mut self, hook: Hook) -> Self {
        self.before_suite.push(hook);
        self
    }

    /// Adds an after-suite hook.
    #[must_use]
    pub fn with_after_suite(mut self, hook: Hook) -> Self {
        self.after_suite.push(hook);
        self
    }

    /// The suite name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Runs `tests` in order.
    pub async fn run(&self, tests: &[TestCase]) -> SuiteResult {
        let started = Instant::now();
        let groups = tests
            .iter()
            .flat_map(|test| test.groups().iter().cloned())
            .collect::<BTreeSet<_>>();
        info!(suite = %self.name, tests = tests.len(), "suite started");

        let results = match self.run_hooks(&self.before_suite, &groups).await {
            Ok(()) => {
                let mut results = Vec::with_capacity(tests.len());
                for test in tests {
                    results.push(self.runner.run(test).await);
                }
                results
            }
            Err(cause) => {
                error!(suite = %self.name, error = %cause, "before-suite hook failed");
                tests
                    .iter()
                    .map(|test| {
                        TestResult::new(test.name(), test.package(), TestOutcome::Failed(cause.clone()))
                            .with_parameters(test.parameters().to_vec())
                    })
                    .collect()
            }
        };

        let after_suite_failure = self.run_hooks(&self.after_suite, &groups).await.err();
        if let Some(err) = &after_suite_failure {
            warn!(suite = %self.name, error = %err, "after-suite hook failed");
        }

        let summary = SuiteResult::new(results, started.elapsed(), after_suite_failure);
        info!(
            suite = %self.name,
            total = summary.total(),
            passed = summary.passed(),
            failed = summary.failed(),
            skipped = summary.skipped(),
            "suite finished"
        );
        summary
    }

    async fn run_hooks(&self, hooks: &[Hook], groups: &BTreeSet<String>) -> ActionResult<()> {
        let applicable = hooks
            .iter()
            .filter(|hook| hook.applies_to_suite(&self.name, groups))
            .collect::<Vec<_>>();
        if applicable.is_empty() {
            return Ok(());
        }

        let context: TestContext = self.runner.factory().create_context();
        let mut first_failure = None;
        for hook in applicable {
            if let Err(err) = hook.actions().run(&context).await {
                first_failure.get_or_insert(err);
            }
        }
        first_failure.map_or(Ok(()), Err)
    }
}
