//! Behaviour tests for running tests over direct endpoints.

mod test_execution_steps;

use rstest_bdd_macros::scenario;
use test_execution_steps::world::{ExecutionWorld, world};

#[scenario(
    path = "tests/features/test_execution.feature",
    name = "Received message matches the control message"
)]
#[tokio::test(flavor = "multi_thread")]
async fn received_message_matches(world: ExecutionWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/test_execution.feature",
    name = "Mismatching message fails the test"
)]
#[tokio::test(flavor = "multi_thread")]
async fn mismatching_message_fails(world: ExecutionWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/test_execution.feature",
    name = "Receiving from a silent endpoint times out"
)]
#[tokio::test(flavor = "multi_thread")]
async fn silent_endpoint_times_out(world: ExecutionWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/test_execution.feature",
    name = "Final actions run after a failing action"
)]
#[tokio::test(flavor = "multi_thread")]
async fn final_actions_run_after_failure(world: ExecutionWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/test_execution.feature",
    name = "Disabled tests are skipped"
)]
#[tokio::test(flavor = "multi_thread")]
async fn disabled_tests_are_skipped(world: ExecutionWorld) {
    let _ = world;
}
