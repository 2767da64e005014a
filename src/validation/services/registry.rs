//! Validator lookup.

use std::sync::Arc;

use tracing::debug;

use crate::message::domain::{Message, MessageType};
use crate::validation::adapters::{
    BinaryMessageValidator, DefaultTextEqualsValidator, EmptyMessageValidator,
    ExpressionScriptValidator, HeaderValidator, JsonPathValidator, JsonPayloadValidator,
    PlainTextValidator, ScriptMessageValidator, XmlPayloadValidator,
};
use crate::validation::error::{ValidationError, ValidationResult};
use crate::validation::ports::{MessageValidator, ScriptValidator};

/// Registered message and script validators.
#[derive(Debug, Clone)]
pub struct MessageValidatorRegistry {
    validators: Vec<Arc<dyn MessageValidator>>,
    script_validators: Vec<Arc<dyn ScriptValidator>>,
    fallback: Arc<dyn MessageValidator>,
}

impl MessageValidatorRegistry {
    /// Creates a registry without validators.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            validators: Vec::new(),
            script_validators: Vec::new(),
            fallback: Arc::new(DefaultTextEqualsValidator),
        }
    }

    /// Creates a registry holding the built-in validators.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::empty()
            .with_validator(Arc::new(HeaderValidator))
            .with_validator(Arc::new(JsonPayloadValidator))
            .with_validator(Arc::new(JsonPathValidator))
            .with_validator(Arc::new(XmlPayloadValidator))
            .with_validator(Arc::new(PlainTextValidator))
            .with_validator(Arc::new(BinaryMessageValidator))
            .with_validator(Arc::new(EmptyMessageValidator))
            .with_validator(Arc::new(ScriptMessageValidator))
            .with_script_validator(Arc::new(ExpressionScriptValidator))
    }

    /// Adds a validator, replacing one with the same name.
    #[must_use]
    pub fn with_validator(mut self, validator: Arc<dyn MessageValidator>) -> Self {
        self.validators
            .retain(|existing| existing.name() != validator.name());
        self.validators.push(validator);
        self
    }

    /// Adds a script validator.
    #[must_use]
    pub fn with_script_validator(mut self, validator: Arc<dyn ScriptValidator>) -> Self {
        self.script_validators.push(validator);
        self
    }

    /// Returns the validator named `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<dyn MessageValidator>> {
        self.validators
            .iter()
            .find(|validator| validator.name() == name)
            .cloned()
    }

    /// Registered script validators.
    #[must_use]
    pub fn script_validators(&self) -> &[Arc<dyn ScriptValidator>] {
        &self.script_validators
    }

    /// Finds the validators for `message` declared as `message_type`.
    ///
    /// Validators supporting the declared type come first. When only
    /// generic validators match a non-empty payload, the payload is
    /// sniffed (`<` XML, `{` or `[` JSON, else plain text) and lookup
    /// repeats for that type. Empty payloads are handled by the generic
    /// validators alone. Otherwise the default text-equality validator
    /// is added, unless `must_find` demands a real match.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NoValidatorFound`] when `must_find` is
    /// set and nothing but generic validators match.
    pub fn find(
        &self,
        message_type: MessageType,
        message: &Message,
        must_find: bool,
    ) -> ValidationResult<Vec<Arc<dyn MessageValidator>>> {
        let mut matching = self.supporting(message_type, message);
        if only_generic(&matching) && !message.payload().is_empty() {
            let sniffed = match message.payload().leading_char() {
                Some('<') => MessageType::Xml,
                Some('{' | '[') => MessageType::Json,
                _ => MessageType::Plaintext,
            };
            if sniffed != message_type {
                debug!(declared = %message_type, %sniffed, "falling back to sniffed message type");
                matching = self.supporting(sniffed, message);
            }
        }

        if only_generic(&matching) && !message.payload().is_empty() {
            if must_find {
                return Err(ValidationError::NoValidatorFound(message_type.to_string()));
            }
            matching.push(self.fallback.clone());
        }
        Ok(matching)
    }

    fn supporting(&self, message_type: MessageType, message: &Message) -> Vec<Arc<dyn MessageValidator>> {
        self.validators
            .iter()
            .filter(|validator| validator.supports_message_type(message_type, message))
            .cloned()
            .collect()
    }
}

impl Default for MessageValidatorRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn only_generic(validators: &[Arc<dyn MessageValidator>]) -> bool {
    validators.iter().all(|validator| validator.is_generic())
}
