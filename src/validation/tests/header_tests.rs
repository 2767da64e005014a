//! Tests for header validation.

use mockable::DefaultClock;
use rstest::{fixture, rstest};
use serde_json::json;

use crate::context::TestContext;
use crate::message::domain::{Message, MessageHeaders};
use crate::validation::adapters::HeaderValidator;
use crate::validation::domain::{HeaderValidationContext, ValidationContext};
use crate::validation::error::ValidationError;
use crate::validation::ports::MessageValidator;

#[fixture]
fn context() -> TestContext {
    TestContext::new()
}

fn message() -> Message {
    Message::new("", &DefaultClock)
}

#[rstest]
fn extra_received_headers_are_tolerated(context: TestContext) {
    let received = message()
        .with_header("operation", json!("order"))
        .with_header("extra", json!(1));
    let control = message()
        .with_header("operation", json!("order"))
        .with_header(MessageHeaders::SYNC_CORRELATION_KEY, json!("ignored"));

    assert!(
        HeaderValidator
            .validate_message(&received, &control, &context, &[])
            .is_ok()
    );
}

#[rstest]
fn all_mismatches_are_reported(context: TestContext) {
    let received = message().with_header("operation", json!("cancel"));
    let control = message()
        .with_header("operation", json!("order"))
        .with_header("region", json!("eu"));

    let err = HeaderValidator
        .validate_message(&received, &control, &context, &[])
        .expect_err("two failures");

    assert_eq!(
        err,
        ValidationError::Multiple(vec![
            ValidationError::mismatch("operation", "order", "cancel"),
            ValidationError::MissingHeader("region".to_owned()),
        ])
    );
}

#[rstest]
fn absent_headers_must_not_be_present(context: TestContext) {
    let received = message().with_header("debug", json!(true));
    let contexts = [ValidationContext::Header(
        HeaderValidationContext::default().with_absent("debug"),
    )];

    let err = HeaderValidator
        .validate_message(&received, &message(), &context, &contexts)
        .expect_err("unexpected header");

    assert_eq!(err, ValidationError::UnexpectedHeader("debug".to_owned()));
}

#[rstest]
fn header_names_may_ignore_case(context: TestContext) {
    let received = message().with_header("Content-Type", json!("text/plain"));
    let control = message().with_header("content-type", json!("@ignore@"));
    let contexts = [ValidationContext::Header(
        HeaderValidationContext::default().ignoring_case(),
    )];

    assert!(
        HeaderValidator
            .validate_message(&received, &control, &context, &contexts)
            .is_ok()
    );
}
