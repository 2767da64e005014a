//! In-memory `direct:` endpoints.
//!
//! `direct:<queue>` sends and receives through a named queue.
//! `direct:sync:<queue>` adds request/reply: the first side to use an
//! endpoint instance fixes its role. A producer-first instance acts as
//! client (send request, receive reply), a consumer-first instance acts
//! as server (receive request, send reply).

mod builder;
mod component;
mod config;
mod endpoint;
mod queue;
mod selector;
mod sync_endpoint;

pub use builder::DirectEndpointBuilder;
pub use component::DirectEndpointComponent;
pub use config::{DIRECT_OPTIONS, DirectEndpointConfiguration};
pub use endpoint::DirectEndpoint;
pub use queue::MessageQueue;
pub use selector::MessageSelector;
pub use sync_endpoint::DirectSyncEndpoint;
