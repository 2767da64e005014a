//! Tests for catch and assert containers and failure classification.

use std::time::Duration;

use rstest::{fixture, rstest};

use super::support::Journal;
use crate::action::container::{AssertFailure, Catch};
use crate::action::dsl::{assert_failure, catch_failures, fail, receive};
use crate::action::error::{ActionError, FailureKind};
use crate::action::ports::TestAction;
use crate::context::TestContext;

#[fixture]
fn context() -> TestContext {
    TestContext::new()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn catch_swallows_failures_and_continues(context: TestContext) {
    let journal = Journal::default();
    catch_failures()
        .with_action(journal.step("first").failing())
        .with_action(journal.step("second"))
        .execute(&context)
        .await
        .expect("caught");

    assert_eq!(journal.entries(), vec!["first", "second"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn catch_rethrows_other_kinds(context: TestContext) {
    let err = Catch::kind(FailureKind::Timeout)
        .with_action(fail("boom"))
        .execute(&context)
        .await
        .expect_err("not caught");

    assert_eq!(err, ActionError::Failed("boom".to_owned()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn receive_timeouts_are_classified_as_timeouts(context: TestContext) {
    let err = receive("direct:nothing-here")
        .with_timeout(Duration::from_millis(20))
        .execute(&context)
        .await
        .expect_err("nothing to receive");

    assert_eq!(err.kind(), FailureKind::Timeout);
    assert!(matches!(err, ActionError::Timeout { ref action, timeout_ms: 20, .. } if action == "receive"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn assert_accepts_the_expected_failure(context: TestContext) {
    context.set_variable("reason", "disk full").expect("variable");

    assert_failure(FailureKind::Execution)
        .with_message("disk")
        .with_action(fail("${reason}"))
        .execute(&context)
        .await
        .expect("asserted");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn assert_supports_matcher_messages(context: TestContext) {
    AssertFailure::any()
        .with_message("@startsWith('disk')@")
        .with_action(fail("disk full"))
        .execute(&context)
        .await
        .expect("asserted");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn assert_fails_when_nothing_fails(context: TestContext) {
    let journal = Journal::default();
    let err = assert_failure(FailureKind::Validation)
        .with_action(journal.step("fine"))
        .execute(&context)
        .await
        .expect_err("must fail");

    assert_eq!(
        err,
        ActionError::AssertionNotRaised {
            expected: "validation".to_owned()
        }
    );
}

#[rstest]
#[case(AssertFailure::kind(FailureKind::Timeout))]
#[case(AssertFailure::any().with_message("other"))]
#[tokio::test(flavor = "multi_thread")]
async fn assert_reports_unexpected_failures(context: TestContext, #[case] container: AssertFailure) {
    let err = container
        .with_action(fail("boom"))
        .execute(&context)
        .await
        .expect_err("must fail");

    match err {
        ActionError::UnexpectedFailure { actual, .. } => {
            assert_eq!(*actual, ActionError::Failed("boom".to_owned()));
        }
        other => panic!("expected unexpected-failure error, got {other:?}"),
    }
}
