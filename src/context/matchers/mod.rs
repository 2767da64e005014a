//! Validation matchers: named assertions embedded in control values.
//!
//! A control value of the form `@name('arg', ...)@` is not compared
//! literally; the named matcher decides whether the actual value passes.

mod library;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::TestContext;
use super::error::ContextError;
use super::functions::split_arguments;
use crate::validation::error::{ValidationError, ValidationResult};

/// Control value that accepts any actual value, including none at all.
pub const IGNORE_PLACEHOLDER: &str = "@ignore@";
/// Marker opening a matcher expression.
pub const MATCHER_PREFIX: &str = "@";
/// Marker closing a matcher expression.
pub const MATCHER_SUFFIX: &str = "@";

/// An assertion applied to a single actual value.
pub trait ValidationMatcher: Send + Sync {
    /// Checks `value` of `field` against the matcher with `params`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MatcherFailed`] when the value does not match.
    fn validate(
        &self,
        field: &str,
        value: &str,
        params: &[String],
        context: &TestContext,
    ) -> ValidationResult<()>;
}

impl<F> ValidationMatcher for F
where
    F: Fn(&str, &str, &[String], &TestContext) -> ValidationResult<()> + Send + Sync,
{
    fn validate(
        &self,
        field: &str,
        value: &str,
        params: &[String],
        context: &TestContext,
    ) -> ValidationResult<()> {
        self(field, value, params, context)
    }
}

/// Returns `true` if `expression` is the ignore placeholder.
#[must_use]
pub fn is_ignore_placeholder(expression: &str) -> bool {
    expression.trim() == IGNORE_PLACEHOLDER
}

/// Returns `true` if `expression` is wrapped in matcher markers.
#[must_use]
pub fn is_matcher_expression(expression: &str) -> bool {
    let trimmed = expression.trim();
    trimmed.len() > MATCHER_PREFIX.len() + MATCHER_SUFFIX.len()
        && trimmed.starts_with(MATCHER_PREFIX)
        && trimmed.ends_with(MATCHER_SUFFIX)
}

/// Registry of named validation matchers.
#[derive(Clone, Default)]
pub struct ValidationMatcherRegistry {
    matchers: HashMap<String, Arc<dyn ValidationMatcher>>,
}

impl ValidationMatcherRegistry {
    /// Creates a registry holding the built-in matchers.
    #[must_use]
    pub fn with_defaults() -> Self {
        library::register_defaults(Self::default())
    }

    /// Adds or replaces a matcher.
    #[must_use]
    pub fn with_matcher(
        mut self,
        name: impl Into<String>,
        matcher: impl ValidationMatcher + 'static,
    ) -> Self {
        self.matchers.insert(name.into(), Arc::new(matcher));
        self
    }

    /// Returns `true` if a matcher named `name` exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.matchers.contains_key(name)
    }

    /// Validates `value` against a full matcher expression such as
    /// `@startsWith('abc')@`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for malformed expressions or
    /// unknown matcher names and [`ValidationError::MatcherFailed`] when
    /// the matcher rejects the value.
    pub fn validate_expression(
        &self,
        field: &str,
        value: &str,
        expression: &str,
        context: &TestContext,
    ) -> ValidationResult<()> {
        let (name, raw_params) = parse_expression(expression)?;
        let matcher = self
            .matchers
            .get(&name)
            .ok_or_else(|| ContextError::UnknownMatcher(name.clone()))?;

        let params = raw_params
            .iter()
            .map(|param| {
                let unquoted = param
                    .strip_prefix('\'')
                    .and_then(|rest| rest.strip_suffix('\''))
                    .unwrap_or(param);
                context.replace_dynamic_content(unquoted)
            })
            .collect::<Result<Vec<_>, _>>()?;

        matcher.validate(field, value, &params, context)
    }
}

impl fmt::Debug for ValidationMatcherRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names = self.matchers.keys().collect::<Vec<_>>();
        names.sort();
        f.debug_struct("ValidationMatcherRegistry")
            .field("matchers", &names)
            .finish()
    }
}

fn parse_expression(expression: &str) -> Result<(String, Vec<String>), ContextError> {
    let inner = expression
        .trim()
        .strip_prefix(MATCHER_PREFIX)
        .and_then(|rest| rest.strip_suffix(MATCHER_SUFFIX))
        .ok_or_else(|| ContextError::InvalidMatcherExpression(expression.to_owned()))?;

    match inner.find('(') {
        None => Ok((inner.trim().to_owned(), Vec::new())),
        Some(open) => {
            let (name, arguments) = inner.split_at(open);
            let args = arguments
                .strip_prefix('(')
                .and_then(|rest| rest.strip_suffix(')'))
                .ok_or_else(|| ContextError::InvalidMatcherExpression(expression.to_owned()))?;
            Ok((name.trim().to_owned(), split_arguments(args)))
        }
    }
}

/// Builds the failure raised by a matcher.
pub(crate) fn mismatch(field: &str, matcher: &str, actual: &str, reason: impl Into<String>) -> ValidationError {
    ValidationError::MatcherFailed {
        field: field.to_owned(),
        matcher: matcher.to_owned(),
        actual: actual.to_owned(),
        reason: reason.into(),
    }
}
