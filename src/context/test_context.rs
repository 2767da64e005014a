//! The per-test state container.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::Duration;

use mockable::Clock;
use serde_json::Value;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::error::{ContextError, ContextResult};
use super::functions::FunctionRegistry;
use super::matchers::ValidationMatcherRegistry;
use super::reference::ReferenceResolver;
use super::timers::StopSignal;
use super::variables::{cut_off_variable_prefix, is_variable_name, lookup_path, replace_variables};
use crate::action::error::{ActionError, ActionResult};
use crate::endpoint::error::EndpointResult;
use crate::endpoint::ports::Endpoint;
use crate::endpoint::services::EndpointFactory;
use crate::message::domain::{Message, value_text};
use crate::message::ports::store::MessageStore;
use crate::settings::Settings;
use crate::validation::services::MessageValidatorRegistry;

/// Collaborators shared by every context created from one factory.
#[derive(Clone)]
pub(crate) struct SharedServices {
    pub(crate) functions: Arc<FunctionRegistry>,
    pub(crate) matchers: Arc<ValidationMatcherRegistry>,
    pub(crate) references: ReferenceResolver,
    pub(crate) endpoint_factory: Arc<EndpointFactory>,
    pub(crate) validators: Arc<MessageValidatorRegistry>,
    pub(crate) settings: Arc<Settings>,
    pub(crate) clock: Arc<dyn Clock + Send + Sync>,
}

struct ContextState {
    services: SharedServices,
    variables: RwLock<HashMap<String, Value>>,
    message_store: Arc<dyn MessageStore>,
    exceptions: Mutex<Vec<ActionError>>,
    timers: Mutex<HashMap<String, StopSignal>>,
    forks: Mutex<Vec<JoinHandle<()>>>,
}

/// Mutable state of one test execution.
///
/// Cloning is cheap and yields a handle onto the same state, which is how
/// forked and parallel actions share variables with the main sequence.
/// All shared state is synchronised, so concurrent writers never lose
/// updates.
///
/// # Examples
///
/// ```
/// use caliper::context::TestContext;
///
/// let context = TestContext::new();
/// context.set_variable("user", "Ada").expect("valid name");
/// let text = context
///     .replace_dynamic_content("Hello citrus:upperCase(${user})!")
///     .expect("resolvable");
/// assert_eq!(text, "Hello ADA!");
/// ```
#[derive(Clone)]
pub struct TestContext {
    state: Arc<ContextState>,
}

impl TestContext {
    /// Creates a standalone context with default registries and settings.
    #[must_use]
    pub fn new() -> Self {
        super::TestContextFactory::default().create_context()
    }

    pub(crate) fn from_services(
        services: SharedServices,
        message_store: Arc<dyn MessageStore>,
        variables: HashMap<String, Value>,
    ) -> Self {
        Self {
            state: Arc::new(ContextState {
                services,
                variables: RwLock::new(variables),
                message_store,
                exceptions: Mutex::new(Vec::new()),
                timers: Mutex::new(HashMap::new()),
                forks: Mutex::new(Vec::new()),
            }),
        }
    }

    // ------------------------------------------------------------------
    // Variables
    // ------------------------------------------------------------------

    /// Sets a variable, overwriting any previous value.
    ///
    /// `name` may be given bare or wrapped as `${name}`.
    ///
    /// # Errors
    ///
    /// Returns [`ContextError::InvalidVariableName`] for an empty name.
    pub fn set_variable(&self, name: &str, value: impl Into<Value>) -> ContextResult<()> {
        let key = cut_off_variable_prefix(name.trim()).trim();
        if key.is_empty() {
            return Err(ContextError::InvalidVariableName);
        }
        let mut guard = self.state.variables.write().map_err(ContextError::poisoned)?;
        guard.insert(key.to_owned(), value.into());
        Ok(())
    }

    /// Sets several variables at once.
    ///
    /// # Errors
    ///
    /// Returns [`ContextError::InvalidVariableName`] for an empty name;
    /// variables before the offending entry are kept.
    pub fn set_variables<I, K, V>(&self, variables: I) -> ContextResult<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        variables
            .into_iter()
            .try_for_each(|(name, value)| self.set_variable(name.as_ref(), value))
    }

    /// Returns the value of a variable.
    ///
    /// Dotted or indexed names (`order.items[0]`) navigate into JSON
    /// values when no variable with the full name exists.
    ///
    /// # Errors
    ///
    /// Returns [`ContextError::UnknownVariable`] if nothing matches.
    pub fn get_variable(&self, name: &str) -> ContextResult<Value> {
        let key = cut_off_variable_prefix(name.trim()).trim();
        let guard = self.state.variables.read().map_err(ContextError::poisoned)?;
        lookup_path(key, &*guard).ok_or_else(|| ContextError::UnknownVariable(key.to_owned()))
    }

    /// Returns a variable rendered as text.
    ///
    /// # Errors
    ///
    /// Returns [`ContextError::UnknownVariable`] if the variable is absent.
    pub fn get_variable_text(&self, name: &str) -> ContextResult<String> {
        self.get_variable(name).map(|value| value_text(&value))
    }

    /// Returns `true` if the variable resolves.
    #[must_use]
    pub fn has_variable(&self, name: &str) -> bool {
        self.get_variable(name).is_ok()
    }

    /// Removes a variable, returning its previous value.
    ///
    /// # Errors
    ///
    /// Returns [`ContextError::LockPoisoned`] if the variable map is unusable.
    pub fn remove_variable(&self, name: &str) -> ContextResult<Option<Value>> {
        let key = cut_off_variable_prefix(name.trim()).trim();
        let mut guard = self.state.variables.write().map_err(ContextError::poisoned)?;
        Ok(guard.remove(key))
    }

    /// Returns a sorted snapshot of all variables.
    ///
    /// # Errors
    ///
    /// Returns [`ContextError::LockPoisoned`] if the variable map is unusable.
    pub fn variables(&self) -> ContextResult<BTreeMap<String, Value>> {
        let guard = self.state.variables.read().map_err(ContextError::poisoned)?;
        Ok(guard
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect())
    }

    // ------------------------------------------------------------------
    // Dynamic content
    // ------------------------------------------------------------------

    /// Resolves variable placeholders, then function calls, in `text`.
    ///
    /// # Errors
    ///
    /// Returns the first resolution failure.
    pub fn replace_dynamic_content(&self, text: &str) -> ContextResult<String> {
        self.replace(text, false)
    }

    /// Like [`TestContext::replace_dynamic_content`], wrapping variable
    /// values in single quotes.
    ///
    /// # Errors
    ///
    /// Returns the first resolution failure.
    pub fn replace_dynamic_content_quoted(&self, text: &str) -> ContextResult<String> {
        self.replace(text, true)
    }

    fn replace(&self, text: &str, quote: bool) -> ContextResult<String> {
        let with_variables = replace_variables(text, quote, |name| self.get_variable_text(name))?;
        self.state
            .services
            .functions
            .replace_functions(&with_variables, self)
    }

    /// Resolves dynamic content inside a JSON value.
    ///
    /// A string consisting of exactly one placeholder yields the variable's
    /// value with its original type; other strings are resolved as text.
    /// Arrays and objects are resolved element-wise.
    ///
    /// # Errors
    ///
    /// Returns the first resolution failure.
    pub fn resolve_dynamic_value(&self, value: &Value) -> ContextResult<Value> {
        match value {
            Value::String(text) if is_variable_name(text.trim()) => {
                self.get_variable(text.trim())
            }
            Value::String(text) => self.replace_dynamic_content(text).map(Value::String),
            Value::Array(items) => items
                .iter()
                .map(|item| self.resolve_dynamic_value(item))
                .collect::<ContextResult<Vec<_>>>()
                .map(Value::Array),
            Value::Object(entries) => entries
                .iter()
                .map(|(key, item)| Ok((key.clone(), self.resolve_dynamic_value(item)?)))
                .collect::<ContextResult<serde_json::Map<_, _>>>()
                .map(Value::Object),
            other => Ok(other.clone()),
        }
    }

    // ------------------------------------------------------------------
    // Collaborators
    // ------------------------------------------------------------------

    /// Returns the function registry.
    #[must_use]
    pub fn function_registry(&self) -> &FunctionRegistry {
        &self.state.services.functions
    }

    /// Returns the validation matcher registry.
    #[must_use]
    pub fn matcher_registry(&self) -> &ValidationMatcherRegistry {
        &self.state.services.matchers
    }

    /// Returns the reference resolver.
    #[must_use]
    pub fn references(&self) -> &ReferenceResolver {
        &self.state.services.references
    }

    /// Returns the message store of this test.
    #[must_use]
    pub fn message_store(&self) -> &dyn MessageStore {
        self.state.message_store.as_ref()
    }

    /// Returns the endpoint factory.
    #[must_use]
    pub fn endpoint_factory(&self) -> &EndpointFactory {
        &self.state.services.endpoint_factory
    }

    /// Returns the message validator registry.
    #[must_use]
    pub fn validator_registry(&self) -> &MessageValidatorRegistry {
        &self.state.services.validators
    }

    /// Returns the framework settings.
    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.state.services.settings
    }

    /// Returns the clock used for message timestamps and date functions.
    #[must_use]
    pub fn clock(&self) -> &(dyn Clock + Send + Sync) {
        self.state.services.clock.as_ref()
    }

    /// Resolves an endpoint URI through the endpoint factory.
    ///
    /// # Errors
    ///
    /// Propagates resolution failures from [`EndpointFactory::create`].
    pub fn resolve_endpoint(&self, uri: &str) -> EndpointResult<Arc<dyn Endpoint>> {
        self.state.services.endpoint_factory.create(uri, self)
    }

    /// Records an outbound message.
    pub fn on_outbound(&self, endpoint: &str, message: &Message) {
        debug!(
            endpoint,
            message_id = %message.id(),
            payload = %message.payload().as_text(),
            "sending message"
        );
    }

    /// Records an inbound message.
    pub fn on_inbound(&self, endpoint: &str, message: &Message) {
        debug!(
            endpoint,
            message_id = %message.id(),
            payload = %message.payload().as_text(),
            "received message"
        );
    }

    // ------------------------------------------------------------------
    // Failures of forked work
    // ------------------------------------------------------------------

    /// Records a failure raised outside the main sequence.
    pub fn add_exception(&self, error: ActionError) {
        warn!(error = %error, "recording failure of forked action");
        self.state
            .exceptions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(error);
    }

    /// Returns `true` if failures were recorded.
    #[must_use]
    pub fn has_exceptions(&self) -> bool {
        !self
            .state
            .exceptions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }

    /// Removes and returns all recorded failures in recording order.
    #[must_use]
    pub fn take_exceptions(&self) -> Vec<ActionError> {
        std::mem::take(
            &mut *self
                .state
                .exceptions
                .lock()
                .unwrap_or_else(PoisonError::into_inner),
        )
    }

    // ------------------------------------------------------------------
    // Timers
    // ------------------------------------------------------------------

    /// Registers a running timer under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`ContextError::DuplicateTimer`] if a timer with this id is
    /// still registered.
    pub fn register_timer(&self, id: &str, signal: StopSignal) -> ContextResult<()> {
        let mut guard = self.state.timers.lock().map_err(ContextError::poisoned)?;
        if guard.get(id).is_some_and(|existing| !existing.is_stopped()) {
            return Err(ContextError::DuplicateTimer(id.to_owned()));
        }
        guard.insert(id.to_owned(), signal);
        Ok(())
    }

    /// Stops the timer registered under `id`. Returns `false` if unknown.
    pub fn stop_timer(&self, id: &str) -> bool {
        let removed = self
            .state
            .timers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id);
        removed.is_some_and(|signal| {
            signal.stop();
            true
        })
    }

    /// Stops every registered timer.
    pub fn stop_timers(&self) {
        let timers = std::mem::take(
            &mut *self
                .state
                .timers
                .lock()
                .unwrap_or_else(PoisonError::into_inner),
        );
        for (id, signal) in timers {
            debug!(timer = %id, "stopping timer");
            signal.stop();
        }
    }

    // ------------------------------------------------------------------
    // Forked tasks
    // ------------------------------------------------------------------

    /// Registers a forked task so its completion can be awaited later.
    pub fn register_fork(&self, handle: JoinHandle<()>) {
        self.state
            .forks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(handle);
    }

    /// Returns the number of forked tasks not yet joined.
    #[must_use]
    pub fn outstanding_forks(&self) -> usize {
        self.state
            .forks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Waits for all forked tasks, including tasks forked while waiting.
    ///
    /// Failures of the forked work itself are recorded as context
    /// exceptions by the forking action; this method only reports tasks
    /// that panicked (recorded as exceptions) or did not finish in time.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::Timeout`] if tasks are still running after
    /// `timeout`; those tasks are aborted.
    pub async fn join_forks(&self, timeout: Duration) -> ActionResult<()> {
        let deadline = tokio::time::Instant::now() + timeout;

        loop {
            let handles = std::mem::take(
                &mut *self
                    .state
                    .forks
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner),
            );
            if handles.is_empty() {
                return Ok(());
            }

            let mut pending = handles.into_iter();
            while let Some(mut handle) = pending.next() {
                match tokio::time::timeout_at(deadline, &mut handle).await {
                    Ok(Ok(())) => {}
                    Ok(Err(err)) => {
                        self.add_exception(ActionError::execution("async", err.to_string()));
                    }
                    Err(_) => {
                        handle.abort();
                        pending.for_each(|rest| rest.abort());
                        return Err(ActionError::timeout(
                            "async",
                            timeout,
                            "forked actions did not complete",
                        ));
                    }
                }
            }
        }
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let variables = self
            .state
            .variables
            .read()
            .map(|guard| guard.len())
            .unwrap_or_default();
        f.debug_struct("TestContext")
            .field("variables", &variables)
            .field("references", &self.state.services.references)
            .finish_non_exhaustive()
    }
}
