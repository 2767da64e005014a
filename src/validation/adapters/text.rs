//! Plain-text comparison.

use regex::Regex;

use crate::context::TestContext;
use crate::context::matchers::{is_ignore_placeholder, is_matcher_expression};
use crate::message::domain::{Message, MessageType};
use crate::validation::domain::{TextValidationContext, ValidationContext};
use crate::validation::error::{ValidationError, ValidationResult};
use crate::validation::ports::MessageValidator;
use crate::validation::rules::validate_value;

use super::normalize_newlines;

const FIELD: &str = "payload";
const INLINE_IGNORE: &str = "@ignore";
const INLINE_VARIABLE: &str = "@variable(";

/// Compares text payloads.
///
/// A control payload consisting of a single matcher expression or the
/// ignore placeholder is checked with the value rules. Otherwise the
/// texts are compared after normalisation, where inline `@ignore@`
/// skips one word of the received text, `@ignore(n)@` skips up to
/// `n` characters and `@variable(name)@` stores the text it covers in
/// the named variable.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextValidator;

impl MessageValidator for PlainTextValidator {
    fn name(&self) -> &'static str {
        "plaintext"
    }

    fn supports_message_type(&self, message_type: MessageType, _message: &Message) -> bool {
        message_type == MessageType::Plaintext
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
                ValidationContext::Text(text) => Some(text.clone()),
                _ => None,
            })
            .unwrap_or_default();

        let control_text = control.payload().as_text();
        let received_text = normalize(&received.payload().as_text(), &options);
        if is_ignore_placeholder(&control_text) || is_single_matcher(&control_text) {
            return validate_value(FIELD, Some(&received_text), &control_text, context);
        }

        let expected = normalize(&context.replace_dynamic_content(&control_text)?, &options);
        if expected.contains(INLINE_IGNORE) || expected.contains(INLINE_VARIABLE) {
            let pattern = token_pattern(&expected)?;
            let Some(captures) = pattern.regex.captures(&received_text) else {
                return Err(ValidationError::mismatch(FIELD, &expected, &received_text));
            };
            for (index, name) in pattern.variables.iter().enumerate() {
                let value = captures
                    .get(index.saturating_add(1))
                    .map_or("", |capture| capture.as_str());
                context.matcher_registry().validate_expression(
                    FIELD,
                    value,
                    &format!("@variable('{name}')@"),
                    context,
                )?;
            }
            return Ok(());
        }
        if expected == received_text {
            Ok(())
        } else {
            Err(ValidationError::mismatch(FIELD, &expected, &received_text))
        }
    }
}

fn is_single_matcher(text: &str) -> bool {
    let trimmed = text.trim();
    is_matcher_expression(trimmed)
        && trimmed
            .get(1..trimmed.len().saturating_sub(1))
            .is_some_and(|inner| !inner.contains('@'))
}

fn normalize(text: &str, options: &TextValidationContext) -> String {
    let newlines = if options.ignore_newline_type {
        normalize_newlines(text)
    } else {
        text.to_owned()
    };
    if options.ignore_whitespace {
        newlines.split_whitespace().collect::<Vec<_>>().join(" ")
    } else {
        newlines.trim().to_owned()
    }
}

/// Anchored regex for a control text with inline tokens, plus the
/// variable names bound to its capture groups in order.
struct TokenPattern {
    regex: Regex,
    variables: Vec<String>,
}

fn token_pattern(control: &str) -> ValidationResult<TokenPattern> {
    let token = Regex::new(r"@(?:ignore(?:\((\d+)\))?|variable\('?([\w.-]+)'?\))@")
        .map_err(|err| ValidationError::InvalidPayload(err.to_string()))?;
    let mut pattern = String::from("(?s)^");
    let mut variables = Vec::new();
    let mut cursor = 0;
    for captures in token.captures_iter(control) {
        let Some(whole) = captures.get(0) else {
            continue;
        };
        pattern.push_str(&regex::escape(control.get(cursor..whole.start()).unwrap_or_default()));
        match (captures.get(1), captures.get(2)) {
            (_, Some(name)) => {
                pattern.push_str("(.+?)");
                variables.push(name.as_str().to_owned());
            }
            (Some(count), None) => pattern.push_str(&format!("(?:.{{0,{}}})", count.as_str())),
            (None, None) => pattern.push_str(r"(?:\w*)"),
        }
        cursor = whole.end();
    }
    pattern.push_str(&regex::escape(control.get(cursor..).unwrap_or_default()));
    pattern.push('$');
    let regex =
        Regex::new(&pattern).map_err(|err| ValidationError::InvalidPayload(err.to_string()))?;
    Ok(TokenPattern { regex, variables })
}
