//! Receiving and validating messages.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info};

use super::store_message;
use crate::action::domain::MessageTemplate;
use crate::action::error::ActionResult;
use crate::action::ports::TestAction;
use crate::context::TestContext;
use crate::message::domain::{Message, MessageType, Payload, value_text};
use crate::validation::adapters::evaluate_json_path;
use crate::validation::domain::ValidationContext;
use crate::validation::error::{ValidationError, ValidationResult};
use crate::validation::ports::MessageValidator;

/// Receives a message from an endpoint's consumer, extracts variables
/// from it and validates it against a control message.
///
/// Variables are extracted before validation, so validation
/// expressions may refer to them.
#[derive(Debug, Clone)]
pub struct ReceiveAction {
    endpoint: String,
    timeout: Option<Duration>,
    selector: Option<String>,
    message_type: Option<MessageType>,
    control: Option<MessageTemplate>,
    validation_contexts: Vec<ValidationContext>,
    validators: Vec<String>,
    header_variables: BTreeMap<String, String>,
    path_variables: BTreeMap<String, String>,
}

impl ReceiveAction {
    /// Receives from the endpoint resolved from `endpoint`.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: None,
            selector: None,
            message_type: None,
            control: None,
            validation_contexts: Vec::new(),
            validators: Vec::new(),
            header_variables: BTreeMap::new(),
            path_variables: BTreeMap::new(),
        }
    }

    /// Overrides the endpoint's receive timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Receives only messages matching `selector`, such as
    /// `operation = 'greet'`.
    #[must_use]
    pub fn with_selector(mut self, selector: impl Into<String>) -> Self {
        self.selector = Some(selector.into());
        self
    }

    /// Declares the expected message type.
    #[must_use]
    pub const fn with_message_type(mut self, message_type: MessageType) -> Self {
        self.message_type = Some(message_type);
        self
    }

    /// Sets the control message.
    #[must_use]
    pub fn with_control(mut self, control: MessageTemplate) -> Self {
        self.control = Some(control);
        self
    }

    /// Adds validation options.
    #[must_use]
    pub fn with_validation(mut self, validation_context: ValidationContext) -> Self {
        self.validation_contexts.push(validation_context);
        self
    }

    /// Validates with the named validator instead of the registry's
    /// selection. Names are looked up in the registry, then in the
    /// reference resolver.
    #[must_use]
    pub fn with_validator(mut self, name: impl Into<String>) -> Self {
        self.validators.push(name.into());
        self
    }

    /// Stores the value of `header` in `variable`.
    #[must_use]
    pub fn extract_header(mut self, header: impl Into<String>, variable: impl Into<String>) -> Self {
        self.header_variables.insert(header.into(), variable.into());
        self
    }

    /// Stores the value at JSON `path` in `variable`.
    #[must_use]
    pub fn extract_path(mut self, path: impl Into<String>, variable: impl Into<String>) -> Self {
        self.path_variables.insert(path.into(), variable.into());
        self
    }

    fn extract_variables(&self, received: &Message, context: &TestContext) -> ValidationResult<()> {
        for (header, variable) in &self.header_variables {
            let value = received
                .header(header)
                .ok_or_else(|| ValidationError::MissingHeader(header.clone()))?;
            context.set_variable(variable, value_text(value))?;
        }
        if self.path_variables.is_empty() {
            return Ok(());
        }

        let document = received
            .payload()
            .to_json()
            .map_err(|err| ValidationError::InvalidPayload(err.to_string()))?;
        for (path, variable) in &self.path_variables {
            let value = evaluate_json_path(&document, path)
                .ok_or_else(|| ValidationError::MissingElement(path.clone()))?;
            context.set_variable(variable, value_text(&value))?;
        }
        Ok(())
    }

    fn validators(
        &self,
        received: &Message,
        message_type: MessageType,
        context: &TestContext,
    ) -> ValidationResult<Vec<Arc<dyn MessageValidator>>> {
        let registry = context.validator_registry();
        if self.validators.is_empty() {
            return registry.find(message_type, received, false);
        }
        self.validators
            .iter()
            .map(|name| match registry.get(name) {
                Some(validator) => Ok(validator),
                None => context
                    .references()
                    .resolve::<Arc<dyn MessageValidator>>(name)?
                    .ok_or_else(|| ValidationError::NoValidatorFound(name.clone())),
            })
            .collect()
    }

    fn validate(&self, received: &Message, context: &TestContext) -> ValidationResult<()> {
        let control = match &self.control {
            Some(template) => template.build(context)?,
            None => Message::new(Payload::Empty, context.clock()),
        };
        let message_type = self
            .message_type
            .unwrap_or(context.settings().default_message_type);

        let validators = self.validators(received, message_type, context)?;
        let errors = validators
            .iter()
            .filter_map(|validator| {
                debug!(validator = validator.name(), "validating received message");
                validator
                    .validate_message(received, &control, context, &self.validation_contexts)
                    .err()
            })
            .collect();
        ValidationError::check(errors)
    }
}

#[async_trait]
impl TestAction for ReceiveAction {
    fn name(&self) -> &'static str {
        "receive"
    }

    fn is_disabled(&self, context: &TestContext) -> bool {
        context
            .resolve_endpoint(&self.endpoint)
            .ok()
            .and_then(|endpoint| endpoint.actor())
            .is_some_and(|actor| actor.is_disabled())
    }

    async fn execute(&self, context: &TestContext) -> ActionResult<()> {
        let endpoint = context.resolve_endpoint(&self.endpoint)?;
        let timeout = self
            .timeout
            .unwrap_or_else(|| endpoint.configuration().timeout());
        let consumer = endpoint.create_consumer();

        let received = match &self.selector {
            Some(selector) => {
                let resolved = context.replace_dynamic_content(selector)?;
                consumer.receive_selected(&resolved, context, timeout).await?
            }
            None => consumer.receive(context, timeout).await?,
        };
        context.on_inbound(endpoint.name(), &received);
        store_message(context, self.name(), endpoint.name(), &received)?;

        self.extract_variables(&received, context)?;
        self.validate(&received, context)?;
        info!(endpoint = endpoint.name(), "received message validated");
        Ok(())
    }
}
