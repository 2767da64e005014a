//! Byte-wise payload comparison.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::context::TestContext;
use crate::message::domain::{Message, MessageType};
use crate::validation::domain::ValidationContext;
use crate::validation::error::{ValidationError, ValidationResult};
use crate::validation::ports::MessageValidator;

/// Requires the received bytes to equal the control bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinaryMessageValidator;

impl MessageValidator for BinaryMessageValidator {
    fn name(&self) -> &'static str {
        "binary"
    }

    fn supports_message_type(&self, message_type: MessageType, _message: &Message) -> bool {
        message_type == MessageType::Binary
    }

    fn validate_message(
        &self,
        received: &Message,
        control: &Message,
        _context: &TestContext,
        _validation_contexts: &[ValidationContext],
    ) -> ValidationResult<()> {
        if control.payload().is_empty() {
            return Ok(());
        }
        let expected = control.payload().to_bytes();
        let actual = received.payload().to_bytes();
        if expected == actual {
            Ok(())
        } else {
            Err(ValidationError::mismatch(
                "payload",
                &STANDARD.encode(expected),
                &STANDARD.encode(actual),
            ))
        }
    }
}
