//! `${name}` placeholder handling.
//!
//! Placeholders are replaced in a single left-to-right pass; replaced
//! values are never scanned again. An escaped placeholder `${//name//}`
//! produces the literal text `${name}`.

use std::collections::HashMap;
use std::hash::BuildHasher;

use serde_json::Value;

use super::error::{ContextError, ContextResult};

/// Opening marker of a variable placeholder.
pub const VARIABLE_PREFIX: &str = "${";
/// Closing marker of a variable placeholder.
pub const VARIABLE_SUFFIX: &str = "}";
/// Marker wrapping an escaped variable name.
pub const VARIABLE_ESCAPE: &str = "//";

/// Returns `true` if `expression` is exactly one placeholder.
#[must_use]
pub fn is_variable_name(expression: &str) -> bool {
    expression.starts_with(VARIABLE_PREFIX) && expression.ends_with(VARIABLE_SUFFIX)
}

/// Strips the placeholder markers from `name`, if present.
#[must_use]
pub fn cut_off_variable_prefix(name: &str) -> &str {
    name.strip_prefix(VARIABLE_PREFIX)
        .and_then(|inner| inner.strip_suffix(VARIABLE_SUFFIX))
        .unwrap_or(name)
}

/// Replaces every placeholder in `text` using `lookup`.
///
/// With `quote` set, resolved values are wrapped in single quotes.
///
/// # Errors
///
/// Returns [`ContextError::UnclosedVariable`] for a placeholder without a
/// closing brace, or whatever `lookup` returns for unknown names.
pub fn replace_variables<F>(text: &str, quote: bool, mut lookup: F) -> ContextResult<String>
where
    F: FnMut(&str) -> ContextResult<String>,
{
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find(VARIABLE_PREFIX) {
        let (before, placeholder) = rest.split_at(start);
        out.push_str(before);

        let body = placeholder.strip_prefix(VARIABLE_PREFIX).unwrap_or(placeholder);
        let end = body
            .find(VARIABLE_SUFFIX)
            .ok_or_else(|| ContextError::UnclosedVariable(text.to_owned()))?;
        let (name, tail) = body.split_at(end);

        if let Some(escaped) = name
            .strip_prefix(VARIABLE_ESCAPE)
            .and_then(|inner| inner.strip_suffix(VARIABLE_ESCAPE))
        {
            out.push_str(VARIABLE_PREFIX);
            out.push_str(escaped);
            out.push_str(VARIABLE_SUFFIX);
        } else {
            let value = lookup(name.trim())?;
            if quote {
                out.push('\'');
                out.push_str(&value);
                out.push('\'');
            } else {
                out.push_str(&value);
            }
        }

        rest = tail.strip_prefix(VARIABLE_SUFFIX).unwrap_or(tail);
    }

    out.push_str(rest);
    Ok(out)
}

/// Looks up `name` in `variables`, descending into JSON values for
/// dotted or indexed names such as `order.items[0].id`.
///
/// An exact match always wins over path navigation.
#[must_use]
pub fn lookup_path<S: BuildHasher>(name: &str, variables: &HashMap<String, Value, S>) -> Option<Value> {
    if let Some(value) = variables.get(name) {
        return Some(value.clone());
    }

    let split_points = name
        .char_indices()
        .filter(|(_, ch)| *ch == '.' || *ch == '[')
        .map(|(idx, _)| idx)
        .collect::<Vec<_>>();

    split_points.into_iter().rev().find_map(|idx| {
        let (root, path) = name.split_at(idx);
        variables.get(root).and_then(|value| navigate(value, path))
    })
}

/// Navigates `path` (`.key`, `[n]` segments) inside `value`.
#[must_use]
pub fn navigate(value: &Value, path: &str) -> Option<Value> {
    let mut current = value;
    let mut rest = path;

    while !rest.is_empty() {
        if let Some(after_dot) = rest.strip_prefix('.') {
            let end = after_dot.find(['.', '[']).unwrap_or(after_dot.len());
            let (key, tail) = after_dot.split_at(end);
            current = current.get(key)?;
            rest = tail;
        } else if let Some(after_bracket) = rest.strip_prefix('[') {
            let end = after_bracket.find(']')?;
            let (index, tail) = after_bracket.split_at(end);
            let position = index.trim().parse::<usize>().ok()?;
            current = current.get(position)?;
            rest = tail.strip_prefix(']').unwrap_or(tail);
        } else {
            return None;
        }
    }

    Some(current.clone())
}
