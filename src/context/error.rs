//! Error types for variable, function and expression resolution.

use thiserror::Error;

use crate::message::error::MessageError;

/// Result type for context operations.
pub type ContextResult<T> = Result<T, ContextError>;

/// Errors raised by the test context and its registries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContextError {
    /// A variable was set with an empty name.
    #[error("variable name must not be empty")]
    InvalidVariableName,

    /// A referenced variable does not exist.
    #[error("unknown variable '{0}'")]
    UnknownVariable(String),

    /// A `${` placeholder was not closed.
    #[error("unclosed variable expression in '{0}'")]
    UnclosedVariable(String),

    /// No function with this name is registered.
    #[error("unknown function '{0}'")]
    UnknownFunction(String),

    /// A function call expression could not be parsed.
    #[error("invalid function call '{expression}': {reason}")]
    InvalidFunctionCall {
        /// The offending expression.
        expression: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A function rejected its arguments or failed while executing.
    #[error("function '{function}' failed: {reason}")]
    FunctionFailed {
        /// The function name.
        function: String,
        /// Failure description.
        reason: String,
    },

    /// No validation matcher with this name is registered.
    #[error("unknown validation matcher '{0}'")]
    UnknownMatcher(String),

    /// A matcher expression could not be parsed.
    #[error("invalid validation matcher expression '{0}'")]
    InvalidMatcherExpression(String),

    /// A boolean expression could not be evaluated.
    #[error("invalid boolean expression '{expression}': {reason}")]
    InvalidExpression {
        /// The offending expression.
        expression: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A named reference does not exist or has another type.
    #[error("unable to resolve reference '{0}'")]
    UnresolvedReference(String),

    /// A timer with this identifier is already running.
    #[error("timer '{0}' is already registered")]
    DuplicateTimer(String),

    /// Shared state was poisoned by a panicking writer.
    #[error("test context state unavailable: {0}")]
    LockPoisoned(String),

    /// The message store failed.
    #[error(transparent)]
    Message(#[from] MessageError),
}

impl ContextError {
    /// Creates a function failure error.
    #[must_use]
    pub fn function_failed(function: &str, reason: impl Into<String>) -> Self {
        Self::FunctionFailed {
            function: function.to_owned(),
            reason: reason.into(),
        }
    }

    /// Creates an expression evaluation error.
    #[must_use]
    pub fn invalid_expression(expression: &str, reason: impl Into<String>) -> Self {
        Self::InvalidExpression {
            expression: expression.to_owned(),
            reason: reason.into(),
        }
    }

    pub(crate) fn poisoned(err: impl std::fmt::Display) -> Self {
        Self::LockPoisoned(err.to_string())
    }
}
