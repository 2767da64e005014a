//! Factories for endpoints, keyed by URI scheme or endpoint type.

use std::fmt;
use std::sync::Arc;

use crate::context::TestContext;
use crate::endpoint::domain::{EndpointProperties, EndpointUri};
use crate::endpoint::error::EndpointResult;

use super::Endpoint;

/// Creates endpoints from URIs of one scheme.
pub trait EndpointComponent: Send + Sync + fmt::Debug {
    /// The URI scheme handled by this component.
    fn name(&self) -> &str;

    /// Creates a new endpoint for `uri`.
    ///
    /// # Errors
    ///
    /// Returns an endpoint error for malformed URIs or unknown options.
    fn create_endpoint(&self, uri: &str, context: &TestContext)
    -> EndpointResult<Arc<dyn Endpoint>>;

    /// Returns the URI query parameters.
    ///
    /// # Errors
    ///
    /// Returns [`crate::endpoint::error::EndpointError::InvalidEndpointUri`]
    /// when the URI cannot be parsed.
    fn parameters(&self, uri: &str) -> EndpointResult<EndpointProperties> {
        Ok(EndpointUri::parse(uri)?.parameters().clone())
    }
}

/// Creates endpoints from a named property bag.
pub trait EndpointBuilder: Send + Sync + fmt::Debug {
    /// Returns `true` if this builder creates endpoints of `endpoint_type`.
    fn supports(&self, endpoint_type: &str) -> bool;

    /// Creates the endpoint.
    ///
    /// # Errors
    ///
    /// Returns an endpoint error for missing or unknown properties.
    fn build(
        &self,
        name: &str,
        properties: &EndpointProperties,
        context: &TestContext,
    ) -> EndpointResult<Arc<dyn Endpoint>>;
}
