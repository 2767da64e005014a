//! Validation error types.
//!
//! Every mismatch carries the field (header, path, column) together with
//! the expected and actual values, so reports can tell which part of a
//! message was wrong.

use std::fmt;

use thiserror::Error;

use crate::context::error::ContextError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Errors raised when a received message or result set does not meet
/// expectations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// No validator supports the message type.
    #[error("failed to find proper message validator for message type '{0}'")]
    NoValidatorFound(String),

    /// A control header is absent from the received message.
    #[error("header element '{0}' is missing")]
    MissingHeader(String),

    /// A header declared absent is present.
    #[error("header element '{0}' must not be present")]
    UnexpectedHeader(String),

    /// A value differs from its control value.
    #[error("values not equal for element '{field}', expected '{expected}' but was '{actual}'")]
    ValueMismatch {
        /// The header, path or column being validated.
        field: String,
        /// The resolved control value.
        expected: String,
        /// The received value.
        actual: String,
    },

    /// A validation matcher rejected a value.
    #[error("matcher '{matcher}' failed for '{field}' with value '{actual}': {reason}")]
    MatcherFailed {
        /// The field being validated.
        field: String,
        /// The matcher name.
        matcher: String,
        /// The received value.
        actual: String,
        /// The matcher's explanation.
        reason: String,
    },

    /// A control column is missing from the result set.
    #[error("could not find column '{0}' in result set")]
    ColumnNotFound(String),

    /// A column has a different number of rows than expected.
    #[error("row count mismatch for column '{column}', expected {expected} but was {actual}")]
    RowCountMismatch {
        /// The column name.
        column: String,
        /// Expected number of values.
        expected: usize,
        /// Actual number of values.
        actual: usize,
    },

    /// A control element or path is missing from the payload.
    #[error("element '{0}' is missing")]
    MissingElement(String),

    /// The payload holds elements the control payload does not.
    #[error("number of child elements not equal for element '{path}', expected {expected} but was {actual}")]
    ElementCountMismatch {
        /// The element path.
        path: String,
        /// Expected child count.
        expected: usize,
        /// Actual child count.
        actual: usize,
    },

    /// An element carries a different number of attributes than the control.
    #[error("number of attributes not equal for element '{path}', expected {expected} but was {actual}")]
    AttributeCountMismatch {
        /// The element path.
        path: String,
        /// Expected attribute count.
        expected: usize,
        /// Actual attribute count.
        actual: usize,
    },

    /// The payload holds an attribute the control element does not declare.
    #[error("attribute '{0}' is not part of the control message")]
    UnexpectedAttribute(String),

    /// An element is bound to a different namespace than the control.
    #[error("element '{path}' has wrong namespace, expected '{expected}' but was '{actual}'")]
    NamespaceMismatch {
        /// The element path.
        path: String,
        /// Expected namespace URI, empty when none.
        expected: String,
        /// Actual namespace URI, empty when none.
        actual: String,
    },

    /// A payload could not be parsed in its declared format.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    /// A validation script rejected the message.
    #[error("script validation failed: {0}")]
    ScriptFailed(String),

    /// No script validator could be chosen.
    #[error("unable to find proper script validator: {0}")]
    NoScriptValidator(String),

    /// Placeholder or matcher resolution failed.
    #[error(transparent)]
    Context(#[from] ContextError),

    /// Several independent checks failed.
    #[error("{}", MultipleErrors(.0))]
    Multiple(Vec<ValidationError>),
}

struct MultipleErrors<'a>(&'a [ValidationError]);

impl fmt::Display for MultipleErrors<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "multiple validation errors: ")?;
        for (index, error) in self.0.iter().enumerate() {
            if index > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl ValidationError {
    /// Creates a value mismatch error.
    #[must_use]
    pub fn mismatch(field: &str, expected: &str, actual: &str) -> Self {
        Self::ValueMismatch {
            field: field.to_owned(),
            expected: expected.to_owned(),
            actual: actual.to_owned(),
        }
    }

    /// Combines several errors. A single error is returned unchanged.
    #[must_use]
    pub fn multiple(mut errors: Vec<Self>) -> Self {
        if errors.len() == 1
            && let Some(single) = errors.pop()
        {
            return single;
        }
        Self::Multiple(errors)
    }

    /// Returns `Ok(())` for no errors, otherwise [`ValidationError::multiple`].
    ///
    /// # Errors
    ///
    /// Returns the combined error when `errors` is non-empty.
    pub fn check(errors: Vec<Self>) -> ValidationResult<()> {
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Self::multiple(errors))
        }
    }
}
