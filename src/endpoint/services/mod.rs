//! Endpoint resolution services.

mod factory;
mod registry;

pub use factory::EndpointFactory;
pub use registry::{BuilderRegistry, ComponentRegistry};
