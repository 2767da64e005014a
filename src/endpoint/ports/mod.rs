//! Endpoint ports.

mod adapter;
mod component;
mod endpoint;

pub use adapter::EndpointAdapter;
pub use component::{EndpointBuilder, EndpointComponent};
pub use endpoint::{Consumer, Endpoint, EndpointConfiguration, Producer};
