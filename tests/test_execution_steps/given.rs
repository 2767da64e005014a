//! Given steps for test execution BDD scenarios.

use super::world::ExecutionWorld;
use caliper::runner::domain::TestCase;
use rstest_bdd_macros::given;

#[given(r#"a test named "{name}""#)]
fn test_named(world: &mut ExecutionWorld, name: String) {
    world.test = TestCase::new(name);
}

#[given(r#"a disabled test named "{name}""#)]
fn disabled_test_named(world: &mut ExecutionWorld, name: String) {
    world.test = TestCase::new(name).disabled();
}

#[given(r#"the variable "{name}" is "{value}""#)]
fn test_variable(world: &mut ExecutionWorld, name: String, value: String) {
    world.update_test(|test| test.with_variable(name, value));
}
