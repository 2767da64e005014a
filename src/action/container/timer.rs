//! Repeated execution on an interval.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};
use uuid::Uuid;

use super::ActionList;
use crate::action::error::ActionResult;
use crate::action::ports::{TestAction, TestActionBuilder};
use crate::context::{StopSignal, TestContext};

/// Suffix of the variable holding a timer's run count.
pub const TIMER_INDEX_SUFFIX: &str = "-index";

/// Runs its actions after `delay` and then every `interval` until the
/// timer is stopped or ran `repeat_count` times.
///
/// Before each run the variable `<id>-index` is set to the run number,
/// starting at 1. A forked timer runs in the background; its failure is
/// recorded as a context exception. A failing run stops the timer.
#[derive(Debug, Clone)]
pub struct Timer {
    id: Option<String>,
    delay: Duration,
    interval: Duration,
    repeat_count: Option<u64>,
    fork: bool,
    actions: ActionList,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Creates a timer with no delay, a one second interval and no run
    /// limit.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            id: None,
            delay: Duration::ZERO,
            interval: Duration::from_secs(1),
            repeat_count: None,
            fork: false,
            actions: ActionList::new(),
        }
    }

    /// Names the timer so it can be stopped.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Waits before the first run.
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Sets the pause between runs.
    #[must_use]
    pub const fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Limits the number of runs.
    #[must_use]
    pub const fn with_repeat_count(mut self, repeat_count: u64) -> Self {
        self.repeat_count = Some(repeat_count);
        self
    }

    /// Runs the timer in the background.
    #[must_use]
    pub const fn forked(mut self) -> Self {
        self.fork = true;
        self
    }

    /// Adds an action.
    #[must_use]
    pub fn with_action(mut self, action: impl TestActionBuilder + 'static) -> Self {
        self.actions.push(action);
        self
    }

    async fn run(&self, id: &str, signal: &StopSignal, context: &TestContext) -> ActionResult<()> {
        tokio::select! {
            () = signal.stopped() => return Ok(()),
            () = tokio::time::sleep(self.delay) => {}
        }

        let index_variable = format!("{id}{TIMER_INDEX_SUFFIX}");
        let mut runs: u64 = 0;
        while !signal.is_stopped() && self.repeat_count.is_none_or(|limit| runs < limit) {
            runs += 1;
            context.set_variable(&index_variable, runs.to_string())?;
            debug!(timer = id, run = runs, "timer fired");
            self.actions.run(context).await?;

            if self.repeat_count.is_some_and(|limit| runs >= limit) {
                break;
            }
            tokio::select! {
                () = signal.stopped() => break,
                () = tokio::time::sleep(self.interval) => {}
            }
        }
        Ok(())
    }
}

async fn run_and_release(timer: Timer, id: String, signal: StopSignal, context: TestContext) -> ActionResult<()> {
    let result = timer.run(&id, &signal, &context).await;
    if let Err(err) = &result {
        warn!(timer = %id, error = %err, "timer stopped after failure");
    }
    context.stop_timer(&id);
    result
}

#[async_trait]
impl TestAction for Timer {
    fn name(&self) -> &'static str {
        "timer"
    }

    async fn execute(&self, context: &TestContext) -> ActionResult<()> {
        let id = match &self.id {
            Some(id) => context.replace_dynamic_content(id)?,
            None => format!("caliper-timer-{}", Uuid::new_v4().simple()),
        };
        let signal = StopSignal::new();
        context.register_timer(&id, signal.clone())?;

        if !self.fork {
            return run_and_release(self.clone(), id, signal, context.clone()).await;
        }

        let forked = context.clone();
        let timer = self.clone();
        let handle = tokio::spawn(async move {
            if let Err(err) = run_and_release(timer, id, signal, forked.clone()).await {
                forked.add_exception(err);
            }
        });
        context.register_fork(handle);
        Ok(())
    }
}
