//! Tests for JSON and JSON path validation.

use mockable::DefaultClock;
use rstest::{fixture, rstest};
use serde_json::json;

use crate::context::TestContext;
use crate::message::domain::Message;
use crate::validation::adapters::{JsonPathValidator, JsonPayloadValidator, evaluate_json_path};
use crate::validation::domain::{JsonPathValidationContext, JsonValidationContext, ValidationContext};
use crate::validation::error::ValidationError;
use crate::validation::ports::MessageValidator;

#[fixture]
fn context() -> TestContext {
    TestContext::new()
}

fn json_message(value: serde_json::Value) -> Message {
    Message::new(value, &DefaultClock)
}

#[rstest]
fn equal_documents_pass(context: TestContext) {
    let received = json_message(json!({"id": 1, "tags": ["a", "b"], "owner": null}));
    let control = json_message(json!({"id": 1, "tags": ["a", "b"], "owner": null}));

    assert!(
        JsonPayloadValidator
            .validate_message(&received, &control, &context, &[])
            .is_ok()
    );
}

#[rstest]
fn placeholders_and_matchers_apply_to_values(context: TestContext) {
    let received = json_message(json!({"id": "7c9e", "created": "2024-05-01", "count": 12}));
    let control = json_message(json!({
        "id": "@ignore@",
        "created": "@matches('\\d{4}-\\d{2}-\\d{2}')@",
        "count": "@greaterThan(10)@"
    }));

    assert!(
        JsonPayloadValidator
            .validate_message(&received, &control, &context, &[])
            .is_ok()
    );
}

#[rstest]
fn value_mismatch_names_the_path(context: TestContext) {
    let received = json_message(json!({"order": {"items": [{"sku": "x"}]}}));
    let control = json_message(json!({"order": {"items": [{"sku": "y"}]}}));

    let err = JsonPayloadValidator
        .validate_message(&received, &control, &context, &[])
        .expect_err("mismatch");

    assert_eq!(err, ValidationError::mismatch("$.order.items[0].sku", "y", "x"));
}

#[rstest]
fn strict_mode_rejects_extra_fields(context: TestContext) {
    let received = json_message(json!({"id": 1, "extra": true}));
    let control = json_message(json!({"id": 1}));

    let strict = JsonPayloadValidator.validate_message(&received, &control, &context, &[]);
    let lenient = JsonPayloadValidator.validate_message(
        &received,
        &control,
        &context,
        &[ValidationContext::Json(JsonValidationContext::lenient())],
    );

    assert!(matches!(strict, Err(ValidationError::ElementCountMismatch { .. })));
    assert!(lenient.is_ok());
}

#[rstest]
fn lenient_arrays_ignore_order(context: TestContext) {
    let received = json_message(json!([3, 1, 2]));
    let control = json_message(json!([1, 2]));

    let result = JsonPayloadValidator.validate_message(
        &received,
        &control,
        &context,
        &[ValidationContext::Json(JsonValidationContext::lenient())],
    );

    assert!(result.is_ok());
}

#[rstest]
fn ignored_paths_are_skipped(context: TestContext) {
    let received = json_message(json!({"id": 1, "timestamp": 123}));
    let control = json_message(json!({"id": 1, "timestamp": 999}));

    let result = JsonPayloadValidator.validate_message(
        &received,
        &control,
        &context,
        &[ValidationContext::Json(
            JsonValidationContext::default().with_ignored("$.timestamp"),
        )],
    );

    assert!(result.is_ok());
}

#[rstest]
fn invalid_received_json_is_reported(context: TestContext) {
    let received = Message::new("{not json", &DefaultClock);
    let control = json_message(json!({"id": 1}));

    let err = JsonPayloadValidator
        .validate_message(&received, &control, &context, &[])
        .expect_err("invalid");

    assert!(matches!(err, ValidationError::InvalidPayload(_)));
}

#[rstest]
#[case("$.items[0].id", Some(json!(7)))]
#[case("$.items.size()", Some(json!(2)))]
#[case("$.meta.keySet()", Some(json!("a, b")))]
#[case("$.missing", None)]
fn evaluates_json_paths(#[case] path: &str, #[case] expected: Option<serde_json::Value>) {
    let document = json!({"items": [{"id": 7}, {"id": 8}], "meta": {"b": 1, "a": 2}});
    assert_eq!(evaluate_json_path(&document, path), expected);
}

#[rstest]
fn json_path_expectations_are_checked(context: TestContext) {
    let received = json_message(json!({"items": [{"id": 7}, {"id": 8}]}));
    let contexts = [ValidationContext::JsonPath(
        JsonPathValidationContext::default()
            .with_expression("$.items.size()", "2")
            .with_expression("$.items[1].id", "9")
            .with_expression("$.total", "@ignore@"),
    )];

    let err = JsonPathValidator
        .validate_message(&received, &Message::new("", &DefaultClock), &context, &contexts)
        .expect_err("two failures");

    assert_eq!(
        err,
        ValidationError::Multiple(vec![
            ValidationError::mismatch("$.items[1].id", "9", "8"),
            ValidationError::MissingElement("$.total".to_owned()),
        ])
    );
}
