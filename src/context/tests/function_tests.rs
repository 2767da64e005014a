//! Tests for function resolution.

use rstest::{fixture, rstest};

use crate::context::TestContext;
use crate::context::error::{ContextError, ContextResult};
use crate::context::functions::FunctionLibrary;
use crate::context::TestContextFactory;

#[fixture]
fn context() -> TestContext {
    TestContext::new()
}

#[rstest]
#[case("citrus:concat('Hello', ' ', 'World')", "Hello World")]
#[case("citrus:upperCase('abc')", "ABC")]
#[case("citrus:lowerCase('ABC')", "abc")]
#[case("citrus:substring('caliper', 2)", "liper")]
#[case("citrus:substring('caliper', 0, 3)", "cal")]
#[case("citrus:stringLength('four')", "4")]
#[case("citrus:translate('a-b-c', '-', '+')", "a+b+c")]
#[case("citrus:sum('1', '2', '3.5')", "6.5")]
#[case("citrus:abs('-4')", "4")]
#[case("citrus:max('3', '9', '1')", "9")]
#[case("citrus:min('3', '9', '1')", "1")]
#[case("citrus:floor('2.7')", "2")]
#[case("citrus:ceiling('2.1')", "3")]
#[case("citrus:escapeXml('<a>')", "&lt;a&gt;")]
#[case("citrus:encodeBase64('hi')", "aGk=")]
#[case("citrus:decodeBase64('aGk=')", "hi")]
fn builtin_functions(context: TestContext, #[case] expression: &str, #[case] expected: &str) {
    assert_eq!(
        context.replace_dynamic_content(expression).expect("resolve"),
        expected
    );
}

#[rstest]
fn nested_call_is_evaluated_once(context: TestContext) {
    let text = context
        .replace_dynamic_content("citrus:concat(citrus:upperCase('a'), 'b')")
        .expect("resolve");
    assert_eq!(text, "Ab");
}

#[rstest]
fn variables_resolve_before_functions(context: TestContext) {
    context.set_variable("name", "ada").expect("set");
    let text = context
        .replace_dynamic_content("Hi citrus:upperCase(${name}), bye")
        .expect("resolve");
    assert_eq!(text, "Hi ADA, bye");
}

#[rstest]
fn random_number_has_requested_length(context: TestContext) {
    let text = context
        .replace_dynamic_content("citrus:randomNumber(6)")
        .expect("resolve");
    assert_eq!(text.len(), 6);
    assert!(text.chars().all(|ch| ch.is_ascii_digit()));
    assert!(!text.starts_with('0'));
}

#[rstest]
fn random_string_respects_case(context: TestContext) {
    let text = context
        .replace_dynamic_content("citrus:randomString(12, 'UPPERCASE')")
        .expect("resolve");
    assert_eq!(text.chars().count(), 12);
    assert!(text.chars().all(|ch| ch.is_ascii_uppercase()));
}

#[rstest]
fn random_uuid_parses(context: TestContext) {
    let text = context
        .replace_dynamic_content("citrus:randomUUID()")
        .expect("resolve");
    assert!(uuid::Uuid::parse_str(&text).is_ok());
}

#[rstest]
fn current_date_uses_format(context: TestContext) {
    let text = context
        .replace_dynamic_content("citrus:currentDate('%Y')")
        .expect("resolve");
    assert_eq!(text.len(), 4);
}

#[rstest]
fn unknown_function_fails(context: TestContext) {
    assert!(matches!(
        context.replace_dynamic_content("citrus:doesNotExist()"),
        Err(ContextError::UnknownFunction(_))
    ));
}

#[rstest]
fn bad_arguments_fail(context: TestContext) {
    assert!(matches!(
        context.replace_dynamic_content("citrus:substring('abc', 5)"),
        Err(ContextError::FunctionFailed { .. })
    ));
}

#[rstest]
fn prefix_without_call_is_plain_text(context: TestContext) {
    assert_eq!(
        context
            .replace_dynamic_content("see citrus:docs for details")
            .expect("resolve"),
        "see citrus:docs for details"
    );
}

#[rstest]
fn custom_library_is_available() {
    let library = FunctionLibrary::new("custom", "my:").with_function(
        "reverse",
        |params: &[String], _: &TestContext| -> ContextResult<String> {
            Ok(params.concat().chars().rev().collect())
        },
    );
    let context = TestContextFactory::default()
        .with_function_library(library)
        .create_context();

    assert_eq!(
        context
            .replace_dynamic_content("my:reverse('abc')")
            .expect("resolve"),
        "cba"
    );
    assert!(context.function_registry().is_function("my:reverse('x')"));
}
