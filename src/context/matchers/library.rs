//! Built-in validation matchers.

use regex::Regex;
use uuid::Uuid;

use super::{ValidationMatcherRegistry, mismatch};
use crate::context::TestContext;
use crate::validation::error::ValidationResult;

pub(super) fn register_defaults(registry: ValidationMatcherRegistry) -> ValidationMatcherRegistry {
    registry
        .with_matcher("equalsIgnoreCase", equals_ignore_case)
        .with_matcher("contains", contains)
        .with_matcher("containsIgnoreCase", contains_ignore_case)
        .with_matcher("startsWith", starts_with)
        .with_matcher("endsWith", ends_with)
        .with_matcher("matches", matches)
        .with_matcher("isNumber", is_number)
        .with_matcher("greaterThan", greater_than)
        .with_matcher("lowerThan", lower_than)
        .with_matcher("isEmpty", is_empty)
        .with_matcher("notEmpty", not_empty)
        .with_matcher("isUUID", is_uuid)
        .with_matcher("ignore", ignore)
        .with_matcher("variable", variable)
}

fn equals_ignore_case(field: &str, value: &str, params: &[String], _: &TestContext) -> ValidationResult<()> {
    let expected = first(params);
    if value.to_lowercase() == expected.to_lowercase() {
        Ok(())
    } else {
        Err(mismatch(field, "equalsIgnoreCase", value, format!("expected '{expected}'")))
    }
}

fn contains(field: &str, value: &str, params: &[String], _: &TestContext) -> ValidationResult<()> {
    let expected = first(params);
    if value.contains(expected) {
        Ok(())
    } else {
        Err(mismatch(field, "contains", value, format!("expected to contain '{expected}'")))
    }
}

fn contains_ignore_case(field: &str, value: &str, params: &[String], _: &TestContext) -> ValidationResult<()> {
    let expected = first(params);
    if value.to_lowercase().contains(&expected.to_lowercase()) {
        Ok(())
    } else {
        Err(mismatch(
            field,
            "containsIgnoreCase",
            value,
            format!("expected to contain '{expected}'"),
        ))
    }
}

fn starts_with(field: &str, value: &str, params: &[String], _: &TestContext) -> ValidationResult<()> {
    let expected = first(params);
    if value.starts_with(expected) {
        Ok(())
    } else {
        Err(mismatch(field, "startsWith", value, format!("expected prefix '{expected}'")))
    }
}

fn ends_with(field: &str, value: &str, params: &[String], _: &TestContext) -> ValidationResult<()> {
    let expected = first(params);
    if value.ends_with(expected) {
        Ok(())
    } else {
        Err(mismatch(field, "endsWith", value, format!("expected suffix '{expected}'")))
    }
}

fn matches(field: &str, value: &str, params: &[String], _: &TestContext) -> ValidationResult<()> {
    let pattern = first(params);
    let regex = Regex::new(&format!("^(?:{pattern})$"))
        .map_err(|err| mismatch(field, "matches", value, format!("invalid pattern: {err}")))?;
    if regex.is_match(value) {
        Ok(())
    } else {
        Err(mismatch(field, "matches", value, format!("expected to match '{pattern}'")))
    }
}

fn is_number(field: &str, value: &str, _: &[String], _: &TestContext) -> ValidationResult<()> {
    value
        .trim()
        .parse::<f64>()
        .map(|_| ())
        .map_err(|_| mismatch(field, "isNumber", value, "not a number"))
}

fn greater_than(field: &str, value: &str, params: &[String], _: &TestContext) -> ValidationResult<()> {
    let (actual, bound) = numeric_pair(field, "greaterThan", value, params)?;
    if actual > bound {
        Ok(())
    } else {
        Err(mismatch(field, "greaterThan", value, format!("expected > {bound}")))
    }
}

fn lower_than(field: &str, value: &str, params: &[String], _: &TestContext) -> ValidationResult<()> {
    let (actual, bound) = numeric_pair(field, "lowerThan", value, params)?;
    if actual < bound {
        Ok(())
    } else {
        Err(mismatch(field, "lowerThan", value, format!("expected < {bound}")))
    }
}

fn is_empty(field: &str, value: &str, _: &[String], _: &TestContext) -> ValidationResult<()> {
    if value.is_empty() {
        Ok(())
    } else {
        Err(mismatch(field, "isEmpty", value, "expected empty value"))
    }
}

fn not_empty(field: &str, value: &str, _: &[String], _: &TestContext) -> ValidationResult<()> {
    if value.is_empty() {
        Err(mismatch(field, "notEmpty", value, "expected non-empty value"))
    } else {
        Ok(())
    }
}

fn is_uuid(field: &str, value: &str, _: &[String], _: &TestContext) -> ValidationResult<()> {
    Uuid::parse_str(value.trim())
        .map(|_| ())
        .map_err(|_| mismatch(field, "isUUID", value, "not a UUID"))
}

fn ignore(_: &str, _: &str, _: &[String], _: &TestContext) -> ValidationResult<()> {
    Ok(())
}

/// Stores the actual value in a variable named by the first parameter,
/// or by the field name when no parameter is given.
fn variable(field: &str, value: &str, params: &[String], context: &TestContext) -> ValidationResult<()> {
    let name = params.first().map_or(field, String::as_str);
    context.set_variable(name, value)?;
    Ok(())
}

fn first(params: &[String]) -> &str {
    params.first().map_or("", String::as_str)
}

fn numeric_pair(
    field: &str,
    matcher: &str,
    value: &str,
    params: &[String],
) -> ValidationResult<(f64, f64)> {
    let actual = value
        .trim()
        .parse::<f64>()
        .map_err(|_| mismatch(field, matcher, value, "not a number"))?;
    let bound = first(params)
        .trim()
        .parse::<f64>()
        .map_err(|_| mismatch(field, matcher, value, format!("invalid bound '{}'", first(params))))?;
    Ok((actual, bound))
}
