//! Endpoint implementations.
//!
//! - [`direct`]: in-memory queues shared through the reference resolver.
//! - [`handlers`]: server-side [`crate::endpoint::ports::EndpointAdapter`]s.
//! - [`AdapterEndpoint`]: an endpoint answering every request through an
//!   adapter.

mod adapter_endpoint;
pub mod direct;
pub mod handlers;

pub use adapter_endpoint::AdapterEndpoint;
