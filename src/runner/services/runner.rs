//! Runs single test cases.

use std::sync::Arc;

use tokio::time::Instant;
use tracing::{debug, warn};

use crate::action::error::{ActionError, ActionResult};
use crate::context::{TestContext, TestContextFactory};
use crate::runner::domain::{Hook, TestCase, TestOutcome, TestResult};
use crate::runner::ports::TestListener;

/// Runs test cases with shared hooks and listeners.
///
/// Each run gets a fresh context from the factory. The run has three
/// phases:
///
/// 1. **start**: test name and package variables, parameters, variables
///    (resolved in order), endpoints and applicable before-test hooks;
/// 2. **actions**: run in order, raising failures recorded by forked
///    work before each action;
/// 3. **finish**: stop timers, join forked work, run final actions,
///    raise remaining forked failures and run applicable after-test
///    hooks. After-test failures are logged, never reported.
///
/// The first failure of any phase is the test's cause.
#[derive(Clone, Default)]
pub struct TestCaseRunner {
    factory: TestContextFactory,
    before_test: Vec<Hook>,
    after_test: Vec<Hook>,
    listeners: Vec<Arc<dyn TestListener>>,
}

impl TestCaseRunner {
    /// Creates a runner using contexts from `factory`.
    #[must_use]
    pub const fn new(factory: TestContextFactory) -> Self {
        Self {
            factory,
            before_test: Vec::new(),
            after_test: Vec::new(),
            listeners: Vec::new(),
        }
    }

    /// Adds a before-test hook.
    #[must_use]
    pub fn with_before_test(mut self, hook: Hook) -> Self {
        self.before_test.push(hook);
        self
    }

    /// Adds an after-test hook.
    #[must_use]
    pub fn with_after_test(mut self, hook: Hook) -> Self {
        self.after_test.push(hook);
        self
    }

    /// Adds a listener.
    #[must_use]
    pub fn with_listener(mut self, listener: Arc<dyn TestListener>) -> Self {
        self.listeners.push(listener);
        self
    }

    /// The context factory.
    #[must_use]
    pub const fn factory(&self) -> &TestContextFactory {
        &self.factory
    }

    /// Runs `test` in a fresh context.
    pub async fn run(&self, test: &TestCase) -> TestResult {
        self.run_in(test, self.factory.create_context()).await
    }

    /// Runs `test` in `context`.
    pub async fn run_in(&self, test: &TestCase, context: TestContext) -> TestResult {
        if !test.is_enabled() {
            self.notify(|listener| listener.on_test_skipped(test));
            return TestResult::new(test.name(), test.package(), TestOutcome::Skipped)
                .with_parameters(test.parameters().to_vec());
        }

        let started = Instant::now();
        self.notify(|listener| listener.on_test_start(test));

        let prepared = self.start(test, &context).await;
        let executed = match prepared {
            Ok(()) => self.execute_actions(test, &context).await,
            Err(err) => Err(err),
        };
        let outcome = match self.finish(test, &context, executed).await {
            Ok(()) => {
                self.notify(|listener| listener.on_test_success(test));
                TestOutcome::Success
            }
            Err(cause) => {
                self.notify(|listener| listener.on_test_failure(test, &cause));
                TestOutcome::Failed(cause)
            }
        };
        self.notify(|listener| listener.on_test_finish(test));

        TestResult::new(test.name(), test.package(), outcome)
            .with_parameters(test.parameters().to_vec())
            .with_duration(started.elapsed())
    }

    async fn start(&self, test: &TestCase, context: &TestContext) -> ActionResult<()> {
        let settings = context.settings();
        context.set_variable(&settings.test_name_variable, test.name())?;
        context.set_variable(&settings.test_package_variable, test.package())?;

        for (name, value) in test.parameters() {
            context.set_variable(name, value.as_str())?;
        }
        for (name, value) in test.variables() {
            let resolved = context.replace_dynamic_content(value)?;
            context.set_variable(name, resolved)?;
        }
        for uri in test.endpoints() {
            context.resolve_endpoint(uri)?;
        }

        for hook in self.before_test.iter().filter(|hook| hook.applies_to(test)) {
            debug!(test = test.name(), "running before-test hook");
            hook.actions().run(context).await?;
        }
        Ok(())
    }

    async fn execute_actions(&self, test: &TestCase, context: &TestContext) -> ActionResult<()> {
        for builder in test.actions().iter() {
            ActionError::aggregate(context.take_exceptions())?;

            let action = builder.build();
            if action.is_disabled(context) {
                self.notify(|listener| listener.on_action_skipped(test, action.name()));
                continue;
            }
            self.notify(|listener| listener.on_action_start(test, action.name()));
            if let Err(err) = action.execute(context).await {
                self.notify(|listener| listener.on_action_failure(test, action.name(), &err));
                return Err(err);
            }
            self.notify(|listener| listener.on_action_finish(test, action.name()));
        }
        Ok(())
    }

    async fn finish(&self, test: &TestCase, context: &TestContext, executed: ActionResult<()>) -> ActionResult<()> {
        let mut outcome = executed;

        context.stop_timers();
        let joined = context
            .join_forks(context.settings().async_completion_timeout())
            .await;
        if outcome.is_ok() {
            outcome = joined;
        } else if let Err(err) = joined {
            warn!(test = test.name(), error = %err, "forked actions did not complete");
        }

        let finals = test.final_actions().run(context).await;
        if outcome.is_ok() {
            outcome = finals;
        } else if let Err(err) = finals {
            warn!(test = test.name(), error = %err, "final action failed");
        }

        let forked_failures = ActionError::aggregate(context.take_exceptions());
        if outcome.is_ok() {
            outcome = forked_failures;
        }

        for hook in self.after_test.iter().filter(|hook| hook.applies_to(test)) {
            if let Err(err) = hook.actions().run(context).await {
                warn!(test = test.name(), error = %err, "after-test hook failed");
            }
        }
        outcome
    }

    fn notify(&self, event: impl Fn(&dyn TestListener)) {
        for listener in &self.listeners {
            event(listener.as_ref());
        }
    }
}
