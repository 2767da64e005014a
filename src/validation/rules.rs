//! Single-value comparison rules shared by every validator.

use crate::context::TestContext;
use crate::context::matchers::{is_ignore_placeholder, is_matcher_expression};
use crate::validation::domain::NULL_VALUE;
use crate::validation::error::{ValidationError, ValidationResult};

/// Compares one received value with its control value.
///
/// In order:
/// 1. The ignore placeholder accepts anything, including NULL.
/// 2. Matcher expressions (`@name(args)@`) delegate to the matcher.
/// 3. Otherwise the control value has placeholders resolved and is
///    compared as text. A NULL actual value matches an empty control
///    value or `NULL`.
///
/// # Errors
///
/// Returns [`ValidationError::ValueMismatch`] or the matcher's failure.
///
/// # Examples
///
/// ```
/// use caliper::context::TestContext;
/// use caliper::validation::rules::validate_value;
///
/// let context = TestContext::new();
/// assert!(validate_value("id", Some("42"), "42", &context).is_ok());
/// assert!(validate_value("id", None, "@ignore@", &context).is_ok());
/// assert!(validate_value("id", None, "NULL", &context).is_ok());
/// assert!(validate_value("id", Some("41"), "42", &context).is_err());
/// ```
pub fn validate_value(
    field: &str,
    actual: Option<&str>,
    control: &str,
    context: &TestContext,
) -> ValidationResult<()> {
    if is_ignore_placeholder(control) {
        return Ok(());
    }
    if is_matcher_expression(control) {
        return context.matcher_registry().validate_expression(
            field,
            actual.unwrap_or(NULL_VALUE),
            control,
            context,
        );
    }

    let expected = context.replace_dynamic_content(control)?;
    match actual {
        None if expected.is_empty() || expected == NULL_VALUE => Ok(()),
        None => Err(ValidationError::mismatch(field, &expected, NULL_VALUE)),
        Some(value) if value == expected => Ok(()),
        Some(value) => Err(ValidationError::mismatch(field, &expected, value)),
    }
}
