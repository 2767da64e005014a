//! Validation of messages without payload.

use crate::context::TestContext;
use crate::message::domain::{Message, MessageType};
use crate::validation::domain::ValidationContext;
use crate::validation::error::{ValidationError, ValidationResult};
use crate::validation::ports::MessageValidator;

/// Handles received messages with an empty payload: the control payload
/// must be empty as well.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyMessageValidator;

impl MessageValidator for EmptyMessageValidator {
    fn name(&self) -> &'static str {
        "empty"
    }

    fn supports_message_type(&self, _message_type: MessageType, message: &Message) -> bool {
        message.payload().is_empty()
    }

    fn is_generic(&self) -> bool {
        true
    }

    fn validate_message(
        &self,
        received: &Message,
        control: &Message,
        _context: &TestContext,
        _validation_contexts: &[ValidationContext],
    ) -> ValidationResult<()> {
        if control.payload().is_empty() {
            Ok(())
        } else {
            Err(ValidationError::mismatch(
                "payload",
                &control.payload().as_text(),
                &received.payload().as_text(),
            ))
        }
    }
}
