//! Message validator port.

use std::fmt;

use crate::context::TestContext;
use crate::message::domain::{Message, MessageType};
use crate::validation::domain::ValidationContext;
use crate::validation::error::ValidationResult;

/// Validates a received message against a control message.
///
/// Implementations must be stateless; the same instance validates
/// messages of concurrently running tests.
pub trait MessageValidator: Send + Sync + fmt::Debug {
    /// Validator name for logs.
    fn name(&self) -> &str;

    /// Returns `true` if this validator handles `message_type`.
    fn supports_message_type(&self, message_type: MessageType, message: &Message) -> bool;

    /// Generic validators (headers, empty payloads, scripts) run alongside
    /// the payload validator and never satisfy validator lookup alone.
    fn is_generic(&self) -> bool {
        false
    }

    /// Validates `received` against `control`.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::validation::error::ValidationError`] describing
    /// every mismatch found.
    fn validate_message(
        &self,
        received: &Message,
        control: &Message,
        context: &TestContext,
        validation_contexts: &[ValidationContext],
    ) -> ValidationResult<()>;
}
