//! Atomic test actions.

mod echo;
mod fail;
mod join;
mod query;
mod receive;
mod send;
mod sleep;
mod timer_control;
mod variables;

pub use echo::EchoAction;
pub use fail::FailAction;
pub use join::JoinAsyncAction;
pub use query::QueryAction;
pub use receive::ReceiveAction;
pub use send::SendAction;
pub use sleep::SleepAction;
pub use timer_control::StopTimerAction;
pub use variables::{CreateVariablesAction, TraceVariablesAction};

use crate::action::error::{ActionError, ActionResult};
use crate::context::TestContext;
use crate::message::domain::Message;

/// Stores `message` under its own name, or `action(endpoint)` when it
/// has none.
fn store_message(context: &TestContext, action: &str, endpoint: &str, message: &Message) -> ActionResult<()> {
    let store = context.message_store();
    let name = message
        .name()
        .map_or_else(|| store.construct_message_name(action, endpoint), str::to_owned);
    store
        .store(&name, message.clone())
        .map_err(|err| ActionError::execution(action, err.to_string()))
}
