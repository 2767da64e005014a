//! Short constructors for composing tests.
//!
//! ```
//! use std::time::Duration;
//!
//! use caliper::action::dsl::{echo, parallel, repeat_on_error, sequential, sleep};
//!
//! let steps = sequential()
//!     .with_action(echo("starting ${test}"))
//!     .with_action(parallel().with_action(sleep(Duration::from_millis(10))))
//!     .with_action(repeat_on_error("i gt 3").with_action(echo("attempt ${i}")));
//! assert_eq!(steps.actions().len(), 3);
//! ```

use std::sync::Arc;
use std::time::Duration;

use crate::action::basic::{
    CreateVariablesAction, EchoAction, FailAction, JoinAsyncAction, QueryAction, ReceiveAction,
    SendAction, SleepAction, StopTimerAction, TraceVariablesAction,
};
use crate::action::container::{
    AssertFailure, AsyncContainer, Catch, Conditional, Iterate, Parallel, RepeatOnErrorUntilTrue,
    RepeatUntilTrue, Sequence, Timer, Wait,
};
use crate::action::domain::{LoopCondition, MessageTemplate, WaitCondition};
use crate::action::error::FailureKind;
use crate::action::ports::QueryExecutor;
use crate::message::domain::Payload;

/// Logs `text`.
#[must_use]
pub fn echo(text: impl Into<String>) -> EchoAction {
    EchoAction::new(text)
}

/// Sleeps for `duration`.
#[must_use]
pub const fn sleep(duration: Duration) -> SleepAction {
    SleepAction::new(duration)
}

/// Declares a message.
#[must_use]
pub fn message(payload: impl Into<Payload>) -> MessageTemplate {
    MessageTemplate::new(payload)
}

/// Sends `message` to `endpoint`.
#[must_use]
pub fn send(endpoint: impl Into<String>, message: MessageTemplate) -> SendAction {
    SendAction::new(endpoint, message)
}

/// Receives from `endpoint`.
#[must_use]
pub fn receive(endpoint: impl Into<String>) -> ReceiveAction {
    ReceiveAction::new(endpoint)
}

/// Creates variables.
#[must_use]
pub fn create_variables() -> CreateVariablesAction {
    CreateVariablesAction::new()
}

/// Logs all variables.
#[must_use]
pub fn trace_variables() -> TraceVariablesAction {
    TraceVariablesAction::all()
}

/// Fails with `message`.
#[must_use]
pub fn fail(message: impl Into<String>) -> FailAction {
    FailAction::new(message)
}

/// Queries through `executor`.
#[must_use]
pub fn query(executor: Arc<dyn QueryExecutor>) -> QueryAction {
    QueryAction::new(executor)
}

/// Stops the timer `id`.
#[must_use]
pub fn stop_timer(id: impl Into<String>) -> StopTimerAction {
    StopTimerAction::new(id)
}

/// Waits for forked actions.
#[must_use]
pub const fn join_async() -> JoinAsyncAction {
    JoinAsyncAction::new()
}

/// Runs actions in order.
#[must_use]
pub const fn sequential() -> Sequence {
    Sequence::new()
}

/// Runs actions concurrently.
#[must_use]
pub const fn parallel() -> Parallel {
    Parallel::new()
}

/// Runs actions in the background.
#[must_use]
pub const fn run_async() -> AsyncContainer {
    AsyncContainer::new()
}

/// Loops while `condition` holds.
#[must_use]
pub fn iterate(condition: impl Into<String>) -> Iterate {
    Iterate::new(LoopCondition::expression(condition))
}

/// Repeats until `condition` holds.
#[must_use]
pub fn repeat(condition: impl Into<String>) -> RepeatUntilTrue {
    RepeatUntilTrue::new(LoopCondition::expression(condition))
}

/// Retries on failure until `condition` holds.
#[must_use]
pub fn repeat_on_error(condition: impl Into<String>) -> RepeatOnErrorUntilTrue {
    RepeatOnErrorUntilTrue::new(LoopCondition::expression(condition))
}

/// Runs actions when `expression` holds.
#[must_use]
pub fn conditional(expression: impl Into<String>) -> Conditional {
    Conditional::when(expression)
}

/// Runs actions on an interval.
#[must_use]
pub const fn timer() -> Timer {
    Timer::new()
}

/// Waits for `condition`.
#[must_use]
pub const fn wait_for(condition: WaitCondition) -> Wait {
    Wait::new(condition)
}

/// Waits until a message named `name` is stored.
#[must_use]
pub fn wait_for_message(name: impl Into<String>) -> Wait {
    Wait::new(WaitCondition::MessageStored(name.into()))
}

/// Waits until a file exists at `path`.
#[must_use]
pub fn wait_for_file(path: impl Into<String>) -> Wait {
    Wait::new(WaitCondition::FileExists(path.into()))
}

/// Catches every failure of the contained actions.
#[must_use]
pub const fn catch_failures() -> Catch {
    Catch::any()
}

/// Expects the contained actions to fail with `kind`.
#[must_use]
pub const fn assert_failure(kind: FailureKind) -> AssertFailure {
    AssertFailure::kind(kind)
}
