//! Messaging endpoints.
//!
//! Actions address endpoints by URI (`direct:orders`,
//! `direct:sync:orders?timeout=500&endpointName=orderServer`) or by the
//! name of an endpoint bound in the context's reference resolver. The
//! [`services::EndpointFactory`] turns either form into a shared
//! [`ports::Endpoint`], which hands out producers for sending and
//! consumers for receiving.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use caliper::context::TestContext;
//! use caliper::message::domain::Message;
//! use mockable::DefaultClock;
//!
//! # tokio_test_block(async {
//! let context = TestContext::new();
//! let endpoint = context.resolve_endpoint("direct:greetings").expect("endpoint");
//! endpoint
//!     .create_producer()
//!     .send(Message::new("hello", &DefaultClock), &context)
//!     .await
//!     .expect("sent");
//! let received = endpoint
//!     .create_consumer()
//!     .receive(&context, Duration::from_millis(100))
//!     .await
//!     .expect("received");
//! assert_eq!(received.payload().as_text(), "hello");
//! # });
//! # fn tokio_test_block(f: impl std::future::Future<Output = ()>) {
//! #     tokio::runtime::Builder::new_current_thread()
//! #         .enable_all()
//! #         .build()
//! #         .expect("runtime")
//! #         .block_on(f);
//! # }
//! ```

pub mod adapters;
pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
