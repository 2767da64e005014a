//! Test doubles shared by the action tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::action::error::{ActionError, ActionResult};
use crate::action::ports::TestAction;
use crate::context::TestContext;

/// Shared log of executed step labels.
#[derive(Debug, Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<String>>>);

impl Journal {
    pub fn entries(&self) -> Vec<String> {
        self.0.lock().expect("journal lock").clone()
    }

    fn record(&self, label: &str) {
        self.0.lock().expect("journal lock").push(label.to_owned());
    }

    /// An action that records `label` after an optional delay.
    pub fn step(&self, label: &str) -> Step {
        Step {
            label: label.to_owned(),
            journal: self.clone(),
            delay: Duration::ZERO,
            fails: false,
            disabled: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Step {
    label: String,
    journal: Journal,
    delay: Duration,
    fails: bool,
    disabled: bool,
}

impl Step {
    pub const fn after(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub const fn failing(mut self) -> Self {
        self.fails = true;
        self
    }

    pub const fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

#[async_trait]
impl TestAction for Step {
    fn name(&self) -> &str {
        &self.label
    }

    fn is_disabled(&self, _context: &TestContext) -> bool {
        self.disabled
    }

    async fn execute(&self, _context: &TestContext) -> ActionResult<()> {
        tokio::time::sleep(self.delay).await;
        self.journal.record(&self.label);
        if self.fails {
            return Err(ActionError::Failed(format!("{} failed", self.label)));
        }
        Ok(())
    }
}

/// Fails the first `failures` executions, then succeeds.
#[derive(Debug, Clone)]
pub struct Flaky {
    failures: usize,
    attempts: Arc<AtomicUsize>,
}

impl Flaky {
    pub fn new(failures: usize) -> Self {
        Self {
            failures,
            attempts: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TestAction for Flaky {
    fn name(&self) -> &'static str {
        "flaky"
    }

    async fn execute(&self, _context: &TestContext) -> ActionResult<()> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
        if attempt <= self.failures {
            Err(ActionError::execution("flaky", format!("attempt {attempt} failed")))
        } else {
            Ok(())
        }
    }
}
