//! Endpoint factory with per-factory caching.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::context::TestContext;
use crate::endpoint::domain::{ENDPOINT_NAME_PARAMETER, EndpointProperties};
use crate::endpoint::error::{EndpointError, EndpointResult};
use crate::endpoint::ports::{Endpoint, EndpointBuilder, EndpointComponent};

use super::{BuilderRegistry, ComponentRegistry};

/// Resolves endpoint URIs to endpoint instances.
///
/// Created endpoints are cached by their `endpointName` parameter, or by
/// the full URI when none is given, so two actions naming the same URI
/// share one endpoint. Components and builders bound in the context's
/// reference resolver take precedence over the registries held here.
#[derive(Debug)]
pub struct EndpointFactory {
    components: ComponentRegistry,
    builders: BuilderRegistry,
    cache: Mutex<HashMap<String, Arc<dyn Endpoint>>>,
}

impl EndpointFactory {
    /// Creates a factory over the given registries.
    #[must_use]
    pub fn new(components: ComponentRegistry, builders: BuilderRegistry) -> Self {
        Self {
            components,
            builders,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Creates a factory over the built-in components and builders.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(ComponentRegistry::defaults(), BuilderRegistry::defaults())
    }

    /// Resolves `uri`.
    ///
    /// A URI without `:` names an endpoint bound in the reference
    /// resolver. Anything else is parsed as `scheme:resource?params` and
    /// created by the component registered for `scheme`.
    ///
    /// # Errors
    ///
    /// - [`EndpointError::InvalidEndpointUri`] for malformed URIs or
    ///   unbound names.
    /// - [`EndpointError::UnknownComponent`] for unknown schemes.
    /// - Component errors for unknown or invalid parameters.
    pub fn create(&self, uri: &str, context: &TestContext) -> EndpointResult<Arc<dyn Endpoint>> {
        let resolved = context.replace_dynamic_content(uri)?;
        if !resolved.contains(':') {
            return context
                .references()
                .resolve::<Arc<dyn Endpoint>>(&resolved)?
                .ok_or_else(|| EndpointError::InvalidEndpointUri(resolved));
        }
        if resolved.split(':').filter(|token| !token.is_empty()).count() < 2 {
            return Err(EndpointError::InvalidEndpointUri(resolved));
        }
        let scheme = resolved.split(':').next().unwrap_or_default();
        let component = self.component(scheme, context)?;
        let parameters = component.parameters(&resolved)?;
        let cache_key = parameters
            .get(ENDPOINT_NAME_PARAMETER)
            .cloned()
            .unwrap_or_else(|| resolved.clone());

        let mut cache = self.cache.lock().map_err(EndpointError::poisoned)?;
        if let Some(cached) = cache.get(&cache_key) {
            debug!(uri = %resolved, "using cached endpoint");
            return Ok(cached.clone());
        }
        let endpoint = component.create_endpoint(&resolved, context)?;
        debug!(uri = %resolved, name = endpoint.name(), "created endpoint");
        cache.insert(cache_key, endpoint.clone());
        Ok(endpoint)
    }

    /// Creates an endpoint of `endpoint_type` from a property bag.
    ///
    /// Builders bound in the reference resolver are consulted first.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointError::NoBuilderFound`] when no builder supports
    /// the type, or the builder's error.
    pub fn create_from_properties(
        &self,
        name: &str,
        properties: &EndpointProperties,
        endpoint_type: &str,
        context: &TestContext,
    ) -> EndpointResult<Arc<dyn Endpoint>> {
        let bound = context
            .references()
            .resolve_all::<Arc<dyn EndpointBuilder>>()?
            .into_iter()
            .map(|(_, builder)| builder)
            .find(|builder| builder.supports(endpoint_type));
        let builder = bound
            .or_else(|| self.builders.find(endpoint_type))
            .ok_or_else(|| EndpointError::NoBuilderFound(endpoint_type.to_owned()))?;
        builder.build(name, properties, context)
    }

    /// Number of cached endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointError::LockPoisoned`] if the cache is unusable.
    pub fn cached_endpoints(&self) -> EndpointResult<usize> {
        Ok(self.cache.lock().map_err(EndpointError::poisoned)?.len())
    }

    fn component(
        &self,
        scheme: &str,
        context: &TestContext,
    ) -> EndpointResult<Arc<dyn EndpointComponent>> {
        context
            .references()
            .resolve::<Arc<dyn EndpointComponent>>(scheme)?
            .or_else(|| self.components.get(scheme))
            .ok_or_else(|| EndpointError::UnknownComponent(scheme.to_owned()))
    }
}

impl Default for EndpointFactory {
    fn default() -> Self {
        Self::with_defaults()
    }
}
