//! Result-set validation inside complete tests.

use std::sync::Arc;
use std::time::Duration;

use caliper::action::adapters::StaticQueryExecutor;
use caliper::action::basic::QueryAction;
use caliper::action::dsl::{message, receive, send};
use caliper::action::error::FailureKind;
use caliper::action::ports::{QueryExecutor, QueryResult};
use caliper::context::TestContextFactory;
use caliper::message::domain::MessageType;
use caliper::runner::domain::TestCase;
use caliper::runner::services::TestCaseRunner;
use caliper::validation::adapters::EXPRESSION_SCRIPT_TYPE;
use caliper::validation::domain::ScriptValidationContext;
use rstest::rstest;
use serde_json::json;
use tokio::runtime::Runtime;

use crate::in_memory::helpers::{BoxError, ensure_success, factory, runtime};

const ORDERS: &str = "SELECT id, status FROM orders WHERE customer = 'ada'";

fn orders() -> QueryResult {
    QueryResult::from([
        ("ID".to_owned(), vec![Some("1001".to_owned()), Some("1002".to_owned())]),
        ("STATUS".to_owned(), vec![Some("SHIPPED".to_owned()), None]),
    ])
}

fn bind_orders(factory: &TestContextFactory) -> Result<StaticQueryExecutor, BoxError> {
    let executor = StaticQueryExecutor::new().with_result(ORDERS, orders());
    let shared: Arc<dyn QueryExecutor> = Arc::new(executor.clone());
    factory.references().bind("ordersDb", shared)?;
    Ok(executor)
}

/// The message names the customer; the database must agree.
#[rstest]
fn database_state_is_checked_after_a_message_exchange(
    runtime: std::io::Result<Runtime>,
    factory: TestContextFactory,
) -> Result<(), BoxError> {
    let rt = runtime?;
    let executor = bind_orders(&factory)?;
    let context = factory.create_context();
    let test = TestCase::new("orders_persisted")
        .with_action(send("direct:customers", message(json!({ "customer": "ada" }))))
        .with_action(
            receive("direct:customers")
                .with_timeout(Duration::from_millis(500))
                .with_message_type(MessageType::Json)
                .extract_path("$.customer", "customer"),
        )
        .with_action(
            QueryAction::referenced("ordersDb")
                .with_statement("SELECT id, status FROM orders WHERE customer = '${customer}'")
                .with_column("id", ["1001", "@startsWith(100)@"])
                .with_column("status", ["SHIPPED", "NULL"])
                .with_validation_script(ScriptValidationContext::new(EXPRESSION_SCRIPT_TYPE, "#{rows} = 2"))
                .extract("id", "orderIds"),
        );

    let result = rt.block_on(TestCaseRunner::new(factory).run_in(&test, context.clone()));

    ensure_success(&result)?;
    assert_eq!(context.get_variable_text("orderIds")?, "1001;1002");
    assert_eq!(executor.executed().len(), 1);
    Ok(())
}

/// A wrong expectation fails the test with a validation failure.
#[rstest]
fn unexpected_rows_fail_validation(runtime: std::io::Result<Runtime>, factory: TestContextFactory) -> Result<(), BoxError> {
    let rt = runtime?;
    bind_orders(&factory)?;
    let test = TestCase::new("orders_missing").with_action(
        QueryAction::referenced("ordersDb")
            .with_statement(ORDERS)
            .with_column("status", ["SHIPPED", "SHIPPED"]),
    );

    let result = rt.block_on(TestCaseRunner::new(factory).run(&test));

    let cause = result.cause().ok_or("test must fail")?;
    assert_eq!(cause.kind(), FailureKind::Validation);
    Ok(())
}
