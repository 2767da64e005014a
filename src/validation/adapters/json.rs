//! Whole-document JSON comparison.

use serde_json::{Map, Value};

use crate::context::TestContext;
use crate::context::matchers::{is_ignore_placeholder, is_matcher_expression};
use crate::message::domain::{Message, MessageType, value_text};
use crate::validation::domain::{JsonValidationContext, ValidationContext};
use crate::validation::error::{ValidationError, ValidationResult};
use crate::validation::ports::MessageValidator;
use crate::validation::rules::validate_value;

use super::parse_json_payload;

/// Compares received JSON with the control JSON element by element.
///
/// String control values may be the ignore placeholder or matcher
/// expressions. In strict mode (the default) objects must have the same
/// keys and arrays the same length and order; lenient mode accepts
/// additional received fields and array elements in any order.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonPayloadValidator;

impl MessageValidator for JsonPayloadValidator {
    fn name(&self) -> &'static str {
        "json"
    }

    fn supports_message_type(&self, message_type: MessageType, _message: &Message) -> bool {
        message_type == MessageType::Json
    }

    fn validate_message(
        &self,
        received: &Message,
        control: &Message,
        context: &TestContext,
        validation_contexts: &[ValidationContext],
    ) -> ValidationResult<()> {
        if control.payload().is_empty() {
            return Ok(());
        }
        let options = validation_contexts
            .iter()
            .find_map(|candidate| match candidate {
                ValidationContext::Json(json) => Some(json.clone()),
                _ => None,
            })
            .unwrap_or_default();

        let actual = parse_json_payload(received)?;
        let expected = parse_json_payload(control)?;
        let mut comparison = Comparison {
            options: &options,
            context,
            errors: Vec::new(),
        };
        comparison.compare("$", &actual, &expected);
        ValidationError::check(comparison.errors)
    }
}

struct Comparison<'a> {
    options: &'a JsonValidationContext,
    context: &'a TestContext,
    errors: Vec<ValidationError>,
}

impl Comparison<'_> {
    fn compare(&mut self, path: &str, actual: &Value, expected: &Value) {
        if self.options.ignore_paths.contains(path) {
            return;
        }
        match (expected, actual) {
            (Value::String(control), _)
                if is_ignore_placeholder(control) || is_matcher_expression(control) =>
            {
                self.check_value(path, actual, control);
            }
            (Value::Object(control), Value::Object(received)) => {
                self.compare_objects(path, received, control);
            }
            (Value::Array(control), Value::Array(received)) => {
                self.compare_arrays(path, received, control);
            }
            (Value::Object(_) | Value::Array(_), _) | (_, Value::Object(_) | Value::Array(_)) => {
                self.errors.push(ValidationError::mismatch(
                    path,
                    &expected.to_string(),
                    &actual.to_string(),
                ));
            }
            _ => self.check_value(path, actual, &value_text(expected)),
        }
    }

    fn check_value(&mut self, path: &str, actual: &Value, control: &str) {
        let actual_text = (!actual.is_null()).then(|| value_text(actual));
        if let Err(err) = validate_value(path, actual_text.as_deref(), control, self.context) {
            self.errors.push(err);
        }
    }

    fn compare_objects(
        &mut self,
        path: &str,
        received: &Map<String, Value>,
        control: &Map<String, Value>,
    ) {
        if self.options.strict && received.len() != control.len() {
            self.errors.push(ValidationError::ElementCountMismatch {
                path: path.to_owned(),
                expected: control.len(),
                actual: received.len(),
            });
        }
        for (key, expected) in control {
            let child = format!("{path}.{key}");
            match received.get(key) {
                Some(actual) => self.compare(&child, actual, expected),
                None if self.options.ignore_paths.contains(&child) => {}
                None => self.errors.push(ValidationError::MissingElement(child)),
            }
        }
    }

    fn compare_arrays(
        &mut self,
        path: &str,
        received: &[Value],
        control: &[Value],
    ) {
        if self.options.strict {
            if received.len() != control.len() {
                self.errors.push(ValidationError::ElementCountMismatch {
                    path: path.to_owned(),
                    expected: control.len(),
                    actual: received.len(),
                });
                return;
            }
            for (index, (actual, expected)) in received.iter().zip(control).enumerate() {
                self.compare(&format!("{path}[{index}]"), actual, expected);
            }
            return;
        }

        for (index, expected) in control.iter().enumerate() {
            let child = format!("{path}[{index}]");
            let found = received.iter().any(|actual| {
                let mut trial = Comparison {
                    options: self.options,
                    context: self.context,
                    errors: Vec::new(),
                };
                trial.compare(&child, actual, expected);
                trial.errors.is_empty()
            });
            if !found {
                self.errors.push(ValidationError::MissingElement(child));
            }
        }
    }
}
