//! Then steps for test execution BDD scenarios.

use super::world::ExecutionWorld;
use rstest_bdd_macros::then;

#[then("the test succeeds")]
fn test_succeeds(world: &ExecutionWorld) -> Result<(), eyre::Report> {
    let result = world.result()?;
    if let Some(cause) = result.cause() {
        return Err(eyre::eyre!("expected success, got: {cause}"));
    }
    if !result.is_success() {
        return Err(eyre::eyre!("expected success, got {:?}", result.outcome()));
    }
    Ok(())
}

#[then("the test fails with a {kind} failure")]
fn test_fails_with_a(world: &ExecutionWorld, kind: String) -> Result<(), eyre::Report> {
    expect_failure_kind(world, &kind)
}

#[then("the test fails with an {kind} failure")]
fn test_fails_with_an(world: &ExecutionWorld, kind: String) -> Result<(), eyre::Report> {
    expect_failure_kind(world, &kind)
}

fn expect_failure_kind(world: &ExecutionWorld, kind: &str) -> Result<(), eyre::Report> {
    let cause = world
        .result()?
        .cause()
        .ok_or_else(|| eyre::eyre!("expected a {kind} failure, but the test did not fail"))?;
    let actual = cause.kind().to_string();
    if actual != kind {
        return Err(eyre::eyre!("expected a {kind} failure, got {actual}: {cause}"));
    }
    Ok(())
}

#[then("the test is skipped")]
fn test_is_skipped(world: &ExecutionWorld) -> Result<(), eyre::Report> {
    if !world.result()?.is_skipped() {
        return Err(eyre::eyre!("expected the test to be skipped"));
    }
    Ok(())
}

#[then(r#"the variable "{name}" is "{value}""#)]
fn variable_is(world: &ExecutionWorld, name: String, value: String) -> Result<(), eyre::Report> {
    let actual = world
        .context
        .get_variable_text(&name)
        .map_err(|err| eyre::eyre!("variable {name}: {err}"))?;
    if actual != value {
        return Err(eyre::eyre!("expected {name} = {value}, got {actual}"));
    }
    Ok(())
}
