//! Endpoint sharing between contexts.

use std::time::Duration;

use caliper::context::TestContextFactory;
use caliper::message::domain::Message;
use mockable::DefaultClock;
use rstest::rstest;
use tokio::runtime::Runtime;

use crate::in_memory::helpers::{BoxError, factory, runtime};

const TIMEOUT: Duration = Duration::from_millis(200);

/// Contexts created by one factory talk through the same queue.
#[rstest]
fn contexts_of_a_factory_share_direct_endpoints(
    runtime: std::io::Result<Runtime>,
    factory: TestContextFactory,
) -> Result<(), BoxError> {
    let rt = runtime?;
    let sender = factory.create_context();
    let receiver = factory.create_context();

    rt.block_on(async {
        sender
            .resolve_endpoint("direct:orders")?
            .create_producer()
            .send(Message::new("order-1", &DefaultClock), &sender)
            .await?;
        let received = receiver
            .resolve_endpoint("direct:orders")?
            .create_consumer()
            .receive(&receiver, TIMEOUT)
            .await?;
        assert_eq!(received.payload().as_text(), "order-1");
        Ok::<(), BoxError>(())
    })
}

/// Separate factories never see each other's messages.
#[rstest]
fn factories_keep_endpoints_apart(runtime: std::io::Result<Runtime>) -> Result<(), BoxError> {
    let rt = runtime?;
    let first = TestContextFactory::default().create_context();
    let second = TestContextFactory::default().create_context();

    rt.block_on(async {
        first
            .resolve_endpoint("direct:orders")?
            .create_producer()
            .send(Message::new("order-1", &DefaultClock), &first)
            .await?;
        let outcome = second
            .resolve_endpoint("direct:orders")?
            .create_consumer()
            .receive(&second, TIMEOUT)
            .await;
        assert!(outcome.is_err(), "second factory must not see the message");
        Ok::<(), BoxError>(())
    })
}
