//! Tests for validation matcher expressions.

use rstest::{fixture, rstest};
use serde_json::json;

use crate::context::error::ContextError;
use crate::context::matchers::{is_ignore_placeholder, is_matcher_expression};
use crate::context::{TestContext, TestContextFactory};
use crate::validation::error::{ValidationError, ValidationResult};

#[fixture]
fn context() -> TestContext {
    TestContext::new()
}

fn check(context: &TestContext, value: &str, expression: &str) -> ValidationResult<()> {
    context
        .matcher_registry()
        .validate_expression("field", value, expression, context)
}

#[rstest]
#[case("HELLO", "@equalsIgnoreCase('hello')@")]
#[case("abcdef", "@contains('cde')@")]
#[case("ABCDEF", "@containsIgnoreCase('cde')@")]
#[case("abcdef", "@startsWith('abc')@")]
#[case("abcdef", "@endsWith('def')@")]
#[case("2024-01-31", "@matches('\\d{4}-\\d{2}-\\d{2}')@")]
#[case("12.5", "@isNumber()@")]
#[case("10", "@greaterThan(5)@")]
#[case("3", "@lowerThan('5')@")]
#[case("", "@isEmpty()@")]
#[case("x", "@notEmpty()@")]
#[case("8c2a4b50-3cf4-4f1a-9a8a-1a0c6a1d8f00", "@isUUID()@")]
#[case("anything", "@ignore()@")]
fn matching_values_pass(context: TestContext, #[case] value: &str, #[case] expression: &str) {
    check(&context, value, expression).expect("value should match");
}

#[rstest]
#[case("abc", "@startsWith('x')@")]
#[case("abc", "@matches('[0-9]+')@")]
#[case("abc", "@isNumber()@")]
#[case("4", "@greaterThan(5)@")]
fn mismatching_values_fail(context: TestContext, #[case] value: &str, #[case] expression: &str) {
    assert!(matches!(
        check(&context, value, expression),
        Err(ValidationError::MatcherFailed { .. })
    ));
}

#[rstest]
fn matches_requires_full_match(context: TestContext) {
    assert!(check(&context, "abc123", "@matches('[a-z]+')@").is_err());
}

#[rstest]
fn matcher_arguments_resolve_variables(context: TestContext) {
    context.set_variable("prefix", "ord-").expect("set");
    check(&context, "ord-17", "@startsWith('${prefix}')@").expect("match");
}

#[rstest]
fn variable_matcher_stores_actual_value(context: TestContext) {
    check(&context, "42", "@variable('orderId')@").expect("store");
    assert_eq!(context.get_variable("orderId").expect("get"), json!("42"));

    check(&context, "7", "@variable()@").expect("store");
    assert_eq!(context.get_variable("field").expect("get"), json!("7"));
}

#[rstest]
fn unknown_matcher_is_configuration_error(context: TestContext) {
    assert_eq!(
        check(&context, "x", "@noSuchMatcher()@"),
        Err(ValidationError::Context(ContextError::UnknownMatcher(
            "noSuchMatcher".to_owned()
        )))
    );
}

#[rstest]
fn custom_matcher_is_used() {
    let context = TestContextFactory::default()
        .with_matcher(
            "isEven",
            |field: &str, value: &str, _: &[String], _: &TestContext| -> ValidationResult<()> {
                match value.parse::<u32>() {
                    Ok(number) if number % 2 == 0 => Ok(()),
                    _ => Err(ValidationError::MatcherFailed {
                        field: field.to_owned(),
                        matcher: "isEven".to_owned(),
                        actual: value.to_owned(),
                        reason: "odd".to_owned(),
                    }),
                }
            },
        )
        .create_context();

    check(&context, "4", "@isEven()@").expect("even");
    assert!(check(&context, "5", "@isEven()@").is_err());
}

#[rstest]
#[case("@ignore@", true)]
#[case(" @ignore@ ", true)]
#[case("@ignore()@", false)]
fn ignore_placeholder_detection(#[case] value: &str, #[case] expected: bool) {
    assert_eq!(is_ignore_placeholder(value), expected);
}

#[rstest]
#[case("@contains('a')@", true)]
#[case("@", false)]
#[case("@@", false)]
#[case("plain", false)]
fn matcher_expression_detection(#[case] value: &str, #[case] expected: bool) {
    assert_eq!(is_matcher_expression(value), expected);
}
