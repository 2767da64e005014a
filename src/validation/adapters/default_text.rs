//! Last-resort text equality.

use crate::context::TestContext;
use crate::message::domain::{Message, MessageType};
use crate::validation::domain::ValidationContext;
use crate::validation::error::{ValidationError, ValidationResult};
use crate::validation::ports::MessageValidator;

use super::normalize_newlines;

/// Compares trimmed, newline-normalised payload text.
///
/// Used when no validator supports the message and lookup was not
/// required to succeed.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTextEqualsValidator;

impl MessageValidator for DefaultTextEqualsValidator {
    fn name(&self) -> &'static str {
        "default-text-equals"
    }

    fn supports_message_type(&self, _message_type: MessageType, _message: &Message) -> bool {
        true
    }

    fn validate_message(
        &self,
        received: &Message,
        control: &Message,
        context: &TestContext,
        _validation_contexts: &[ValidationContext],
    ) -> ValidationResult<()> {
        if control.payload().is_empty() {
            return Ok(());
        }
        let expected =
            normalize_newlines(&context.replace_dynamic_content(&control.payload().as_text())?)
                .trim()
                .to_owned();
        let actual = normalize_newlines(&received.payload().as_text())
            .trim()
            .to_owned();
        if expected == actual {
            Ok(())
        } else {
            Err(ValidationError::mismatch("payload", &expected, &actual))
        }
    }
}
