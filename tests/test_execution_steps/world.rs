//! Shared world state for test execution BDD scenarios.

use caliper::action::ports::TestActionBuilder;
use caliper::context::{TestContext, TestContextFactory};
use caliper::runner::domain::{TestCase, TestResult};
use caliper::runner::services::TestCaseRunner;
use rstest::fixture;

/// Scenario world for test execution behaviour tests.
pub struct ExecutionWorld {
    /// Factory shared by the runner and the inspected context.
    pub factory: TestContextFactory,
    /// Context the test runs in, kept for inspecting variables.
    pub context: TestContext,
    /// The test being assembled.
    pub test: TestCase,
    /// Result of the last run.
    pub result: Option<TestResult>,
}

impl ExecutionWorld {
    /// Creates a world with an empty test.
    #[must_use]
    pub fn new() -> Self {
        let factory = TestContextFactory::default();
        let context = factory.create_context();
        Self {
            factory,
            context,
            test: TestCase::new("scenario"),
            result: None,
        }
    }

    /// Replaces the test under construction.
    pub fn update_test(&mut self, update: impl FnOnce(TestCase) -> TestCase) {
        let test = std::mem::replace(&mut self.test, TestCase::new("scenario"));
        self.test = update(test);
    }

    /// Appends an action to the test.
    pub fn add_action(&mut self, action: impl TestActionBuilder + 'static) {
        self.update_test(|test| test.with_action(action));
    }

    /// Runs the test in the world's context.
    pub fn run(&mut self) {
        let runner = TestCaseRunner::new(self.factory.clone());
        self.result = Some(run_async(runner.run_in(&self.test, self.context.clone())));
    }

    /// The result of the last run.
    ///
    /// # Errors
    ///
    /// Returns an error if the test has not been run.
    pub fn result(&self) -> Result<&TestResult, eyre::Report> {
        self.result
            .as_ref()
            .ok_or_else(|| eyre::eyre!("the test has not been run"))
    }
}

impl Default for ExecutionWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> ExecutionWorld {
    ExecutionWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
