//! JSON path expectations.

use serde_json::Value;

use crate::context::TestContext;
use crate::context::variables::navigate;
use crate::message::domain::{Message, MessageType, value_text};
use crate::validation::domain::ValidationContext;
use crate::validation::error::{ValidationError, ValidationResult};
use crate::validation::ports::MessageValidator;
use crate::validation::rules::validate_value;

use super::parse_json_payload;

const SIZE_SUFFIX: &str = ".size()";
const KEYS_SUFFIX: &str = ".keySet()";

/// Evaluates a JSON path against `document`.
///
/// Supported: `$`, `.key`, `[n]`, and the trailing functions `.size()`
/// (array or object length) and `.keySet()` (sorted object keys).
///
/// # Examples
///
/// ```
/// use caliper::validation::adapters::evaluate_json_path;
/// use serde_json::json;
///
/// let document = json!({"items": [{"id": 7}, {"id": 8}]});
/// assert_eq!(evaluate_json_path(&document, "$.items[1].id"), Some(json!(8)));
/// assert_eq!(evaluate_json_path(&document, "$.items.size()"), Some(json!(2)));
/// ```
#[must_use]
pub fn evaluate_json_path(document: &Value, path: &str) -> Option<Value> {
    let trimmed = path.trim();
    let relative = trimmed.strip_prefix('$').unwrap_or(trimmed);
    if let Some(target) = relative.strip_suffix(SIZE_SUFFIX) {
        return match navigate(document, target)? {
            Value::Array(items) => Some(Value::from(items.len())),
            Value::Object(fields) => Some(Value::from(fields.len())),
            _ => Some(Value::from(1)),
        };
    }
    if let Some(target) = relative.strip_suffix(KEYS_SUFFIX) {
        return match navigate(document, target)? {
            Value::Object(fields) => Some(Value::from(
                fields.keys().cloned().collect::<Vec<_>>().join(", "),
            )),
            _ => None,
        };
    }
    navigate(document, relative)
}

/// Checks [`crate::validation::domain::JsonPathValidationContext`]
/// expectations.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonPathValidator;

impl MessageValidator for JsonPathValidator {
    fn name(&self) -> &'static str {
        "json-path"
    }

    fn supports_message_type(&self, message_type: MessageType, _message: &Message) -> bool {
        message_type == MessageType::Json
    }

    fn validate_message(
        &self,
        received: &Message,
        _control: &Message,
        context: &TestContext,
        validation_contexts: &[ValidationContext],
    ) -> ValidationResult<()> {
        let expectations = validation_contexts
            .iter()
            .filter_map(|candidate| match candidate {
                ValidationContext::JsonPath(paths) => Some(&paths.expressions),
                _ => None,
            })
            .flatten()
            .collect::<Vec<_>>();
        if expectations.is_empty() {
            return Ok(());
        }

        let document = parse_json_payload(received)?;
        let mut errors = Vec::new();
        for (raw_path, expected) in expectations {
            let path = context.replace_dynamic_content(raw_path)?;
            let Some(actual) = evaluate_json_path(&document, &path) else {
                errors.push(ValidationError::MissingElement(path));
                continue;
            };
            let actual_text = (!actual.is_null()).then(|| value_text(&actual));
            if let Err(err) = validate_value(&path, actual_text.as_deref(), expected, context) {
                errors.push(err);
            }
        }
        ValidationError::check(errors)
    }
}
