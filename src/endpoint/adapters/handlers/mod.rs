//! Ready-made endpoint adapters.

mod direct;
mod dispatching;
mod empty_response;
mod static_response;

pub use direct::DirectEndpointAdapter;
pub use dispatching::RequestDispatchingEndpointAdapter;
pub use empty_response::EmptyResponseEndpointAdapter;
pub use static_response::StaticResponseEndpointAdapter;
