//! Action containers: sequencing, concurrency, loops, timing and
//! failure handling.
//!
//! Containers hold [`TestActionBuilder`]s and build their children each
//! time they execute, so a container can run repeatedly and
//! concurrently without sharing child state.

mod async_container;
mod catch;
mod conditional;
mod iterate;
mod parallel;
mod repeat;
mod sequence;
mod timer;
mod wait;

pub use async_container::AsyncContainer;
pub use catch::{AssertFailure, Catch};
pub use conditional::Conditional;
pub use iterate::Iterate;
pub use parallel::Parallel;
pub use repeat::{RepeatOnErrorUntilTrue, RepeatUntilTrue};
pub use sequence::Sequence;
pub use timer::{TIMER_INDEX_SUFFIX, Timer};
pub use wait::Wait;

use std::sync::Arc;

use tracing::debug;

use crate::action::error::ActionResult;
use crate::action::ports::{TestAction, TestActionBuilder};
use crate::context::TestContext;

/// Default name of loop index variables.
pub const DEFAULT_INDEX_NAME: &str = "i";

/// Ordered child actions of a container.
#[derive(Debug, Clone, Default)]
pub struct ActionList(Vec<Arc<dyn TestActionBuilder>>);

impl ActionList {
    /// Creates an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends an action.
    pub fn push(&mut self, action: impl TestActionBuilder + 'static) {
        self.0.push(Arc::new(action));
    }

    /// Appends a shared builder.
    pub fn push_shared(&mut self, action: Arc<dyn TestActionBuilder>) {
        self.0.push(action);
    }

    /// Number of actions.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the list holds no actions.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the builders in order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn TestActionBuilder>> {
        self.0.iter()
    }

    /// Runs the actions in order, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns the first failure.
    pub async fn run(&self, context: &TestContext) -> ActionResult<()> {
        for builder in &self.0 {
            run_action(builder.build().as_ref(), context).await?;
        }
        Ok(())
    }
}

impl<B: TestActionBuilder + 'static> FromIterator<B> for ActionList {
    fn from_iter<I: IntoIterator<Item = B>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|builder| Arc::new(builder) as Arc<dyn TestActionBuilder>)
                .collect(),
        )
    }
}

/// Runs `action` unless it is disabled.
pub(crate) async fn run_action(action: &dyn TestAction, context: &TestContext) -> ActionResult<()> {
    if action.is_disabled(context) {
        debug!(action = action.name(), "skipping disabled action");
        return Ok(());
    }
    debug!(action = action.name(), "executing action");
    action.execute(context).await
}
