//! Default sets of endpoint components and builders.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::endpoint::adapters::direct::{DirectEndpointBuilder, DirectEndpointComponent};
use crate::endpoint::ports::{EndpointBuilder, EndpointComponent};

/// Endpoint components keyed by URI scheme.
#[derive(Debug, Clone, Default)]
pub struct ComponentRegistry {
    components: BTreeMap<String, Arc<dyn EndpointComponent>>,
}

impl ComponentRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in components.
    #[must_use]
    pub fn defaults() -> Self {
        Self::new().with_component(Arc::new(DirectEndpointComponent))
    }

    /// Registers `component` under its own name.
    #[must_use]
    pub fn with_component(mut self, component: Arc<dyn EndpointComponent>) -> Self {
        self.components
            .insert(component.name().to_owned(), component);
        self
    }

    /// Looks up the component for `scheme`.
    #[must_use]
    pub fn get(&self, scheme: &str) -> Option<Arc<dyn EndpointComponent>> {
        self.components.get(scheme).cloned()
    }

    /// Registered scheme names.
    pub fn schemes(&self) -> impl Iterator<Item = &str> {
        self.components.keys().map(String::as_str)
    }
}

/// Endpoint builders, consulted in registration order.
#[derive(Debug, Clone, Default)]
pub struct BuilderRegistry {
    builders: Vec<Arc<dyn EndpointBuilder>>,
}

impl BuilderRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in builders.
    #[must_use]
    pub fn defaults() -> Self {
        Self::new()
            .with_builder(Arc::new(DirectEndpointBuilder::asynchronous()))
            .with_builder(Arc::new(DirectEndpointBuilder::synchronous()))
    }

    /// Appends `builder`.
    #[must_use]
    pub fn with_builder(mut self, builder: Arc<dyn EndpointBuilder>) -> Self {
        self.builders.push(builder);
        self
    }

    /// Returns the first builder supporting `endpoint_type`.
    #[must_use]
    pub fn find(&self, endpoint_type: &str) -> Option<Arc<dyn EndpointBuilder>> {
        self.builders
            .iter()
            .find(|builder| builder.supports(endpoint_type))
            .cloned()
    }
}
