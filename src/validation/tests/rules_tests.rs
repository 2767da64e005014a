//! Tests for the shared value rules.

use rstest::{fixture, rstest};

use crate::context::TestContext;
use crate::validation::error::ValidationError;
use crate::validation::rules::validate_value;

#[fixture]
fn context() -> TestContext {
    TestContext::new()
}

#[rstest]
#[case(Some("anything"))]
#[case(None)]
fn ignore_placeholder_accepts_everything(context: TestContext, #[case] actual: Option<&str>) {
    assert!(validate_value("field", actual, "@ignore@", &context).is_ok());
}

#[rstest]
#[case("")]
#[case("NULL")]
fn null_matches_empty_or_null_control(context: TestContext, #[case] control: &str) {
    assert!(validate_value("field", None, control, &context).is_ok());
}

#[rstest]
fn null_does_not_match_a_value(context: TestContext) {
    assert_eq!(
        validate_value("field", None, "x", &context),
        Err(ValidationError::mismatch("field", "x", "NULL"))
    );
}

#[rstest]
fn control_values_resolve_variables(context: TestContext) {
    context.set_variable("id", "42").expect("set");

    assert!(validate_value("id", Some("42"), "${id}", &context).is_ok());
    assert_eq!(
        validate_value("id", Some("41"), "${id}", &context),
        Err(ValidationError::mismatch("id", "42", "41"))
    );
}

#[rstest]
fn matcher_expressions_are_delegated(context: TestContext) {
    assert!(validate_value("name", Some("caliper"), "@startsWith('cal')@", &context).is_ok());
    assert!(matches!(
        validate_value("name", Some("caliper"), "@startsWith('x')@", &context),
        Err(ValidationError::MatcherFailed { .. })
    ));
}
