//! When steps for test execution BDD scenarios.

use std::time::Duration;

use super::world::ExecutionWorld;
use caliper::action::dsl::{create_variables, fail, message, receive, send};
use caliper::message::domain::MessageType;
use eyre::WrapErr;
use rstest_bdd_macros::when;
use serde_json::Value;

const RECEIVE_TIMEOUT: Duration = Duration::from_millis(200);

fn parse(payload: &str) -> Result<Value, eyre::Report> {
    serde_json::from_str(payload).wrap_err_with(|| format!("invalid JSON payload: {payload}"))
}

#[when(r#"the test sends '{payload}' to "{endpoint}""#)]
fn sends(world: &mut ExecutionWorld, payload: String, endpoint: String) -> Result<(), eyre::Report> {
    let body = parse(&payload)?;
    world.add_action(send(endpoint, message(body)));
    Ok(())
}

#[when(r#"the test receives '{payload}' from "{endpoint}""#)]
fn receives(world: &mut ExecutionWorld, payload: String, endpoint: String) -> Result<(), eyre::Report> {
    let control = parse(&payload)?;
    world.add_action(
        receive(endpoint)
            .with_timeout(RECEIVE_TIMEOUT)
            .with_message_type(MessageType::Json)
            .with_control(message(control)),
    );
    Ok(())
}

#[when(r#"the test fails with "{reason}""#)]
fn fails_with(world: &mut ExecutionWorld, reason: String) {
    world.add_action(fail(reason));
}

#[when(r#"the test finally sets "{name}" to "{value}""#)]
fn finally_sets(world: &mut ExecutionWorld, name: String, value: String) {
    world.update_test(|test| test.with_final_action(create_variables().with_variable(name, value)));
}

#[when("the test is run")]
fn test_is_run(world: &mut ExecutionWorld) {
    world.run();
}
