//! Tests for send and receive actions over direct endpoints.

use std::time::Duration;

use rstest::{fixture, rstest};
use serde_json::json;

use crate::action::dsl::{message, receive, send, sequential};
use crate::action::error::{ActionError, FailureKind};
use crate::action::ports::TestAction;
use crate::context::TestContext;
use crate::endpoint::domain::TestActor;
use crate::message::domain::MessageType;
use crate::validation::domain::{HeaderValidationContext, ValidationContext};
use crate::validation::error::ValidationError;

const TIMEOUT: Duration = Duration::from_millis(500);

#[fixture]
fn context() -> TestContext {
    TestContext::new()
}

async fn send_order(context: &TestContext, id: &str, status: &str) {
    send(
        "direct:orders",
        message(json!({ "id": id, "status": status })).with_header("operation", "create"),
    )
    .execute(context)
    .await
    .expect("send");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn received_message_validates_against_the_control_message(context: TestContext) {
    context.set_variable("id", "42").expect("variable");
    send_order(&context, "${id}", "NEW").await;

    receive("direct:orders")
        .with_timeout(TIMEOUT)
        .with_message_type(MessageType::Json)
        .with_control(
            message(json!({ "id": "${id}", "status": "@ignore@" })).with_header("operation", "create"),
        )
        .extract_header("operation", "operation")
        .extract_path("$.status", "status")
        .execute(&context)
        .await
        .expect("receive");

    assert_eq!(context.get_variable_text("operation").expect("operation"), "create");
    assert_eq!(context.get_variable_text("status").expect("status"), "NEW");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn mismatching_payload_fails_with_a_validation_error(context: TestContext) {
    send_order(&context, "7", "NEW").await;

    let err = receive("direct:orders")
        .with_timeout(TIMEOUT)
        .with_message_type(MessageType::Json)
        .with_control(message(json!({ "id": "7", "status": "DONE" })))
        .execute(&context)
        .await
        .expect_err("must fail");

    assert_eq!(err.kind(), FailureKind::Validation);
    assert!(err.to_string().contains("DONE"), "unexpected message: {err}");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn absent_headers_are_enforced(context: TestContext) {
    send_order(&context, "1", "NEW").await;

    let err = receive("direct:orders")
        .with_timeout(TIMEOUT)
        .with_message_type(MessageType::Json)
        .with_validation(ValidationContext::Header(
            HeaderValidationContext::default().with_absent("operation"),
        ))
        .execute(&context)
        .await
        .expect_err("must fail");

    assert_eq!(
        err,
        ActionError::Validation(ValidationError::UnexpectedHeader("operation".to_owned()))
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn selectors_pick_matching_messages(context: TestContext) {
    send_order(&context, "1", "NEW").await;
    send(
        "direct:orders",
        message(json!({ "id": "2", "status": "NEW" })).with_header("operation", "cancel"),
    )
    .execute(&context)
    .await
    .expect("send");

    receive("direct:orders")
        .with_timeout(TIMEOUT)
        .with_selector("operation = 'cancel'")
        .with_message_type(MessageType::Json)
        .extract_path("$.id", "cancelled")
        .execute(&context)
        .await
        .expect("receive");

    assert_eq!(context.get_variable_text("cancelled").expect("id"), "2");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sent_and_received_messages_are_stored(context: TestContext) {
    send_order(&context, "3", "NEW").await;
    receive("direct:orders")
        .with_timeout(TIMEOUT)
        .with_message_type(MessageType::Json)
        .execute(&context)
        .await
        .expect("receive");

    let store = context.message_store();
    assert!(store.get("send(direct:orders)").expect("store").is_some());
    assert!(store.get("receive(direct:orders)").expect("store").is_some());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn forked_send_does_not_block(context: TestContext) {
    send("direct:jobs", message("work"))
        .forked()
        .execute(&context)
        .await
        .expect("send");

    receive("direct:jobs")
        .with_timeout(TIMEOUT)
        .with_message_type(MessageType::Plaintext)
        .with_control(message("work"))
        .execute(&context)
        .await
        .expect("receive");
    context
        .join_forks(Duration::from_secs(1))
        .await
        .expect("join");
    assert!(!context.has_exceptions());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn actions_on_disabled_actors_are_skipped(context: TestContext) {
    let endpoint = context.resolve_endpoint("direct:legacy").expect("endpoint");
    endpoint.set_actor(Some(TestActor::new("legacy-system").with_disabled(true)));

    sequential()
        .with_action(receive("direct:legacy").with_timeout(Duration::from_millis(10)))
        .execute(&context)
        .await
        .expect("skipped");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_explicit_validators_are_configuration_errors(context: TestContext) {
    send_order(&context, "5", "NEW").await;

    let err = receive("direct:orders")
        .with_timeout(TIMEOUT)
        .with_validator("no-such-validator")
        .execute(&context)
        .await
        .expect_err("must fail");

    assert_eq!(err.kind(), FailureKind::Configuration);
}
