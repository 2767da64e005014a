//! Header validation.

use serde_json::Value;

use crate::context::TestContext;
use crate::message::domain::{Message, MessageType, is_internal_header, value_text};
use crate::validation::domain::{HeaderValidationContext, ValidationContext};
use crate::validation::error::{ValidationError, ValidationResult};
use crate::validation::ports::MessageValidator;
use crate::validation::rules::validate_value;

/// Compares control headers with received headers.
///
/// Extra received headers are accepted unless a
/// [`HeaderValidationContext`] lists them as absent. Internal
/// `caliper_` headers of the control message are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderValidator;

impl MessageValidator for HeaderValidator {
    fn name(&self) -> &'static str {
        "header"
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
        control: &Message,
        context: &TestContext,
        validation_contexts: &[ValidationContext],
    ) -> ValidationResult<()> {
        let options = validation_contexts
            .iter()
            .find_map(|candidate| match candidate {
                ValidationContext::Header(header) => Some(header.clone()),
                _ => None,
            })
            .unwrap_or_default();

        let mut errors = Vec::new();
        for (raw_name, control_value) in control.headers() {
            if is_internal_header(raw_name) {
                continue;
            }
            let name = context.replace_dynamic_content(raw_name)?;
            let Some(actual) = find_header(received, &name, &options) else {
                errors.push(ValidationError::MissingHeader(name));
                continue;
            };
            let actual_text = (!actual.is_null()).then(|| value_text(actual));
            if let Err(err) = validate_value(
                &name,
                actual_text.as_deref(),
                &value_text(control_value),
                context,
            ) {
                errors.push(err);
            }
        }

        for absent in &options.absent {
            if find_header(received, absent, &options).is_some() {
                errors.push(ValidationError::UnexpectedHeader(absent.clone()));
            }
        }

        ValidationError::check(errors)
    }
}

fn find_header<'a>(
    message: &'a Message,
    name: &str,
    options: &HeaderValidationContext,
) -> Option<&'a Value> {
    if options.ignore_case {
        message
            .headers()
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    } else {
        message.header(name)
    }
}
