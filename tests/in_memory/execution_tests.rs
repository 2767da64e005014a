//! Complete tests over direct endpoints.

use std::time::Duration;

use caliper::action::dsl::{
    create_variables, message, parallel, receive, repeat_on_error, run_async, send, sequential, sleep,
    wait_for_message,
};
use caliper::action::error::FailureKind;
use caliper::context::TestContextFactory;
use caliper::message::domain::MessageType;
use caliper::runner::domain::TestCase;
use caliper::runner::services::TestCaseRunner;
use rstest::rstest;
use serde_json::json;
use tokio::runtime::Runtime;

use crate::in_memory::helpers::{BoxError, ensure_success, factory, runtime};

const TIMEOUT: Duration = Duration::from_millis(500);

/// A request/response round trip with variables and extraction.
#[rstest]
fn request_and_reply_validate_end_to_end(
    runtime: std::io::Result<Runtime>,
    factory: TestContextFactory,
) -> Result<(), BoxError> {
    let rt = runtime?;
    let context = factory.create_context();
    let test = TestCase::new("order_round_trip")
        .in_package("shop.orders")
        .with_variable("orderId", "citrus:concat('order-', '1001')")
        .with_action(send(
            "direct:orders",
            message(json!({ "id": "${orderId}", "items": 2 })).with_header("operation", "create"),
        ))
        .with_action(
            receive("direct:orders")
                .with_timeout(TIMEOUT)
                .with_message_type(MessageType::Json)
                .with_control(
                    message(json!({ "id": "${orderId}", "items": "@greaterThan(1)@" }))
                        .with_header("operation", "create"),
                )
                .extract_path("$.items", "itemCount"),
        );

    let result = rt.block_on(TestCaseRunner::new(factory).run_in(&test, context.clone()));

    ensure_success(&result)?;
    assert_eq!(context.get_variable_text("orderId")?, "order-1001");
    assert_eq!(context.get_variable_text("itemCount")?, "2");
    Ok(())
}

/// Parallel producers deliver every message before the group completes.
#[rstest]
fn parallel_senders_all_deliver(runtime: std::io::Result<Runtime>, factory: TestContextFactory) -> Result<(), BoxError> {
    let rt = runtime?;
    let test = TestCase::new("fan_out")
        .with_action(
            parallel()
                .with_action(send("direct:fan", message("a")))
                .with_action(send("direct:fan", message("b")))
                .with_action(send("direct:fan", message("c"))),
        )
        .with_action(
            sequential()
                .with_action(receive("direct:fan").with_timeout(TIMEOUT))
                .with_action(receive("direct:fan").with_timeout(TIMEOUT))
                .with_action(receive("direct:fan").with_timeout(TIMEOUT)),
        );

    let result = rt.block_on(TestCaseRunner::new(factory).run(&test));

    ensure_success(&result)?;
    Ok(())
}

/// A late forked send is awaited with a wait condition.
#[rstest]
fn wait_observes_a_late_forked_send(
    runtime: std::io::Result<Runtime>,
    factory: TestContextFactory,
) -> Result<(), BoxError> {
    let rt = runtime?;
    let test = TestCase::new("late_delivery")
        .with_action(
            run_async()
                .with_action(sleep(Duration::from_millis(100)))
                .with_action(send("direct:late", message("done").with_name("late-reply"))),
        )
        .with_action(
            wait_for_message("late-reply")
                .with_timeout(Duration::from_secs(2))
                .with_interval(Duration::from_millis(20)),
        );

    let result = rt.block_on(TestCaseRunner::new(factory).run(&test));

    ensure_success(&result)?;
    Ok(())
}

/// Polling receives are retried until the message shows up.
#[rstest]
fn repeat_on_error_polls_until_delivery(
    runtime: std::io::Result<Runtime>,
    factory: TestContextFactory,
) -> Result<(), BoxError> {
    let rt = runtime?;
    let context = factory.create_context();
    let test = TestCase::new("polling")
        .with_action(
            run_async()
                .with_action(sleep(Duration::from_millis(120)))
                .with_action(send("direct:polled", message("ready"))),
        )
        .with_action(
            repeat_on_error("i gt 20")
                .with_auto_sleep(Duration::from_millis(10))
                .with_action(receive("direct:polled").with_timeout(Duration::from_millis(20)))
                .with_action(create_variables().with_variable("attempts", "${i}")),
        );

    let result = rt.block_on(TestCaseRunner::new(factory).run_in(&test, context.clone()));

    ensure_success(&result)?;
    let attempts = context.get_variable_text("attempts")?.parse::<u32>()?;
    assert!(attempts > 1, "expected several attempts, got {attempts}");
    Ok(())
}

/// Nothing arrives, so the test fails with a timeout.
#[rstest]
fn silent_endpoint_fails_with_timeout(
    runtime: std::io::Result<Runtime>,
    factory: TestContextFactory,
) -> Result<(), BoxError> {
    let rt = runtime?;
    let test = TestCase::new("silence")
        .with_action(receive("direct:silent").with_timeout(Duration::from_millis(50)));

    let result = rt.block_on(TestCaseRunner::new(factory).run(&test));

    let cause = result.cause().ok_or("test must fail")?;
    assert_eq!(cause.kind(), FailureKind::Timeout);
    Ok(())
}
