//! Tests for plain-text, binary and empty-message validation.

use mockable::DefaultClock;
use rstest::{fixture, rstest};

use crate::context::TestContext;
use crate::message::domain::{Message, Payload};
use crate::validation::adapters::{
    BinaryMessageValidator, DefaultTextEqualsValidator, EmptyMessageValidator, PlainTextValidator,
};
use crate::validation::domain::{TextValidationContext, ValidationContext};
use crate::validation::error::ValidationError;
use crate::validation::ports::MessageValidator;

#[fixture]
fn context() -> TestContext {
    TestContext::new()
}

fn text(payload: &str) -> Message {
    Message::new(payload, &DefaultClock)
}

fn validate(received: &str, control: &str, context: &TestContext) -> Result<(), ValidationError> {
    PlainTextValidator.validate_message(&text(received), &text(control), context, &[])
}

#[rstest]
#[case("Hello World, time is 1718000000!", "Hello World, time is @ignore@!")]
#[case("Hello World, time is 1718000000!", "Hello @ignore@, time is @ignore(100)@")]
#[case("Hello World, time is 1718000000!", "@ignore(11)@, time is @ignore@!")]
#[case("Hello World, time is 1718000000!", "@ignore@")]
#[case("1a2b3c4d_5e6f7g8h", "1a@ignore(4)@4d_@ignore(6)@8h")]
#[case(
    "0b3f5c2e-8f7a-4b1e-9c4d-2a6b8e0f1d3c",
    "@ignore@-@ignore@-@ignore@-@ignore@-@ignore@"
)]
fn inline_ignores_skip_text(context: TestContext, #[case] received: &str, #[case] control: &str) {
    assert!(validate(received, control, &context).is_ok(), "{control}");
}

#[rstest]
fn inline_ignore_covers_one_word_only(context: TestContext) {
    assert_eq!(
        validate("Hello World!", "Hello @ignore@", &context),
        Err(ValidationError::mismatch("payload", "Hello @ignore@", "Hello World!"))
    );
}

#[rstest]
fn inline_variables_capture_received_text(context: TestContext) {
    validate(
        "Hello World, time is 1718000000!",
        "Hello World, time is @variable(time)@!",
        &context,
    )
    .expect("time captured");
    assert_eq!(context.get_variable_text("time").expect("time"), "1718000000");

    validate(
        "Hello World, time is 1718000001!",
        "Hello @variable('world')@, time is @variable(time)@!",
        &context,
    )
    .expect("both captured");
    assert_eq!(context.get_variable_text("world").expect("world"), "World");
    assert_eq!(context.get_variable_text("time").expect("time"), "1718000001");
}

#[rstest]
#[case("Today is 24.12.2017", "24.12.2017")]
#[case("Today is 2017-12-24", "2017-12-24")]
fn trailing_variable_takes_the_rest(
    context: TestContext,
    #[case] received: &str,
    #[case] expected: &str,
) {
    validate(received, "Today is @variable('date')@", &context).expect("date captured");
    assert_eq!(context.get_variable_text("date").expect("date"), expected);
}

#[rstest]
fn whole_payload_variable_stores_everything(context: TestContext) {
    let id = "0b3f5c2e-8f7a-4b1e-9c4d-2a6b8e0f1d3c";
    validate(id, "@variable('id')@", &context).expect("id captured");
    assert_eq!(context.get_variable_text("id").expect("id"), id);
}

#[rstest]
fn inline_variables_mix_with_ignores(context: TestContext) {
    validate(
        "Hello World, time is 1718000000!",
        "Hello @ignore@, time is @variable(time)@!",
        &context,
    )
    .expect("mixed tokens");
    assert_eq!(context.get_variable_text("time").expect("time"), "1718000000");
}

#[rstest]
fn surrounding_text_still_has_to_match(context: TestContext) {
    let err = validate(
        "Goodbye World, time is 1718000000!",
        "Hello World, time is @variable(time)@!",
        &context,
    )
    .expect_err("prefix differs");

    assert!(matches!(err, ValidationError::ValueMismatch { .. }));
    assert!(!context.has_variable("time"));
}

#[rstest]
fn whole_payload_matchers_apply(context: TestContext) {
    assert!(validate("Hello World!", "@contains('World!')@", &context).is_ok());
    assert!(validate("Hello World!", "@contains('Space!')@", &context).is_err());
}

#[rstest]
fn variables_in_control_text_are_resolved(context: TestContext) {
    context.set_variable("world", "World").expect("set");
    assert!(validate("Hello World!", "Hello ${world}!", &context).is_ok());
}

#[rstest]
fn surrounding_whitespace_is_trimmed(context: TestContext) {
    assert!(validate("   Hello World!   ", "Hello World!", &context).is_ok());
}

#[rstest]
fn whitespace_can_be_collapsed(context: TestContext) {
    let contexts = [ValidationContext::Text(TextValidationContext {
        ignore_whitespace: true,
        ignore_newline_type: true,
    })];

    let result = PlainTextValidator.validate_message(
        &text("Hello \n\t World"),
        &text("Hello World"),
        &context,
        &contexts,
    );

    assert!(result.is_ok());
}

#[rstest]
fn wrong_text_reports_both_values(context: TestContext) {
    let err = validate("Hello World!", "Hello Caliper!", &context).expect_err("mismatch");
    let rendered = err.to_string();

    assert!(rendered.contains("expected 'Hello Caliper!'"));
    assert!(rendered.contains("but was 'Hello World!'"));
}

#[rstest]
fn binary_payloads_compare_bytes(context: TestContext) {
    let received = Message::new(Payload::Binary(vec![1, 2, 3]), &DefaultClock);
    let same = Message::new(Payload::Binary(vec![1, 2, 3]), &DefaultClock);
    let other = Message::new(Payload::Binary(vec![1, 2, 4]), &DefaultClock);

    assert!(
        BinaryMessageValidator
            .validate_message(&received, &same, &context, &[])
            .is_ok()
    );
    assert!(
        BinaryMessageValidator
            .validate_message(&received, &other, &context, &[])
            .is_err()
    );
}

#[rstest]
fn empty_messages_need_empty_control(context: TestContext) {
    let received = text("");

    assert!(
        EmptyMessageValidator
            .validate_message(&received, &text(""), &context, &[])
            .is_ok()
    );
    assert!(
        EmptyMessageValidator
            .validate_message(&received, &text("something"), &context, &[])
            .is_err()
    );
}

#[rstest]
fn default_text_equality_normalises_newlines(context: TestContext) {
    let result = DefaultTextEqualsValidator.validate_message(
        &text("line one\r\nline two\n"),
        &text("line one\nline two"),
        &context,
        &[],
    );

    assert!(result.is_ok());
}
