//! Creation of fresh test contexts.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use serde_json::Value;

use super::functions::{FunctionLibrary, FunctionRegistry};
use super::matchers::{ValidationMatcher, ValidationMatcherRegistry};
use super::reference::ReferenceResolver;
use super::test_context::{SharedServices, TestContext};
use crate::endpoint::services::EndpointFactory;
use crate::message::adapters::memory::InMemoryMessageStore;
use crate::settings::Settings;
use crate::validation::services::MessageValidatorRegistry;

/// Builds one [`TestContext`] per test execution.
///
/// Registries, the reference resolver, the endpoint factory and settings
/// are shared by all contexts of a factory. Variables and the message
/// store are created fresh for each context, seeded only with the global
/// variables.
///
/// # Examples
///
/// ```
/// use caliper::context::TestContextFactory;
/// use caliper::settings::Settings;
/// use serde_json::json;
///
/// let factory = TestContextFactory::new(Settings::default())
///     .with_global_variable("env", json!("staging"));
///
/// let first = factory.create_context();
/// first.set_variable("local", "x").expect("valid name");
///
/// let second = factory.create_context();
/// assert!(second.has_variable("env"));
/// assert!(!second.has_variable("local"));
/// ```
#[derive(Clone)]
pub struct TestContextFactory {
    services: SharedServices,
    global_variables: BTreeMap<String, Value>,
}

impl TestContextFactory {
    /// Creates a factory with default registries for `settings`.
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        let global_variables = settings
            .global_variables
            .iter()
            .map(|(name, value)| (name.clone(), Value::String(value.clone())))
            .collect();

        Self {
            services: SharedServices {
                functions: Arc::new(FunctionRegistry::with_default_library(
                    &settings.function_prefix,
                )),
                matchers: Arc::new(ValidationMatcherRegistry::with_defaults()),
                references: ReferenceResolver::new(),
                endpoint_factory: Arc::new(EndpointFactory::default()),
                validators: Arc::new(MessageValidatorRegistry::default()),
                settings: Arc::new(settings),
                clock: Arc::new(DefaultClock),
            },
            global_variables,
        }
    }

    /// Uses `clock` for timestamps and date functions.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        self.services.clock = clock;
        self
    }

    /// Adds a function library.
    #[must_use]
    pub fn with_function_library(mut self, library: FunctionLibrary) -> Self {
        let registry = Arc::unwrap_or_clone(self.services.functions).with_library(library);
        self.services.functions = Arc::new(registry);
        self
    }

    /// Adds or replaces a validation matcher.
    #[must_use]
    pub fn with_matcher(
        mut self,
        name: impl Into<String>,
        matcher: impl ValidationMatcher + 'static,
    ) -> Self {
        let registry = Arc::unwrap_or_clone(self.services.matchers).with_matcher(name, matcher);
        self.services.matchers = Arc::new(registry);
        self
    }

    /// Replaces the endpoint factory.
    #[must_use]
    pub fn with_endpoint_factory(mut self, factory: EndpointFactory) -> Self {
        self.services.endpoint_factory = Arc::new(factory);
        self
    }

    /// Replaces the message validator registry.
    #[must_use]
    pub fn with_validator_registry(mut self, registry: MessageValidatorRegistry) -> Self {
        self.services.validators = Arc::new(registry);
        self
    }

    /// Adds a variable seeded into every new context.
    #[must_use]
    pub fn with_global_variable(mut self, name: impl Into<String>, value: Value) -> Self {
        self.global_variables.insert(name.into(), value);
        self
    }

    /// Returns the shared reference resolver, for binding collaborators.
    #[must_use]
    pub const fn references(&self) -> &ReferenceResolver {
        &self.services.references
    }

    /// Returns the settings handed to every context.
    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.services.settings
    }

    /// Returns the global variables.
    #[must_use]
    pub const fn global_variables(&self) -> &BTreeMap<String, Value> {
        &self.global_variables
    }

    /// Creates a fresh context.
    #[must_use]
    pub fn create_context(&self) -> TestContext {
        let variables = self
            .global_variables
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect::<HashMap<_, _>>();
        TestContext::from_services(
            self.services.clone(),
            Arc::new(InMemoryMessageStore::new()),
            variables,
        )
    }
}

impl Default for TestContextFactory {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}
