//! Runs script validation contexts against received messages.

use crate::context::TestContext;
use crate::message::domain::{Message, MessageType};
use crate::validation::domain::ValidationContext;
use crate::validation::error::{ValidationError, ValidationResult};
use crate::validation::ports::{MessageValidator, ScriptSubject};
use crate::validation::services::resolve_script_validator;

/// Evaluates every [`ValidationContext::Script`] with the script
/// validator chosen for it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptMessageValidator;

impl MessageValidator for ScriptMessageValidator {
    fn name(&self) -> &'static str {
        "script"
    }

    fn supports_message_type(&self, _message_type: MessageType, _message: &Message) -> bool {
        true
    }

    fn is_generic(&self) -> bool {
        true
    }

    fn validate_message(
        &self,
        received: &Message,
        _control: &Message,
        context: &TestContext,
        validation_contexts: &[ValidationContext],
    ) -> ValidationResult<()> {
        let mut errors = Vec::new();
        for script in validation_contexts.iter().filter_map(|candidate| match candidate {
            ValidationContext::Script(script) => Some(script),
            _ => None,
        }) {
            let validator =
                resolve_script_validator(script.validator.as_deref(), &script.script_type, context)?;
            if let Err(err) =
                validator.validate(ScriptSubject::Message(received), &script.script, context)
            {
                errors.push(err);
            }
        }
        ValidationError::check(errors)
    }
}
