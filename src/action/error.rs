//! Action failures and their classification.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

use crate::context::error::ContextError;
use crate::endpoint::error::EndpointError;
use crate::settings::to_millis;
use crate::validation::error::ValidationError;

/// Result type for action execution.
pub type ActionResult<T> = Result<T, ActionError>;

/// Broad failure classes used by reporting and by `catch`/`assert`
/// containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Bad setup: unknown endpoint, missing validator, invalid option.
    Configuration,
    /// The wrong message or value arrived.
    Validation,
    /// Nothing arrived, or a condition never held, in time.
    Timeout,
    /// Any other failure raised while running an action.
    Execution,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Configuration => "configuration",
            Self::Validation => "validation",
            Self::Timeout => "timeout",
            Self::Execution => "execution",
        })
    }
}

/// Errors raised by test actions.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ActionError {
    /// A received message or result set did not validate.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// An endpoint could not be resolved or used.
    #[error(transparent)]
    Endpoint(EndpointError),

    /// Variable, function or reference resolution failed.
    #[error(transparent)]
    Context(#[from] ContextError),

    /// An action did not complete in time.
    #[error("action '{action}' timed out after {timeout_ms} ms: {reason}")]
    Timeout {
        /// The action that timed out.
        action: String,
        /// The timeout in milliseconds.
        timeout_ms: u64,
        /// What was being waited for.
        reason: String,
    },

    /// A wait condition never became true.
    #[error("condition '{condition}' not satisfied within {timeout_ms} ms")]
    WaitTimeout {
        /// The condition name.
        condition: String,
        /// The timeout in milliseconds.
        timeout_ms: u64,
    },

    /// An action was configured inconsistently.
    #[error("invalid action configuration: {0}")]
    Configuration(String),

    /// A deliberate failure raised by a `fail` action.
    #[error("{0}")]
    Failed(String),

    /// An action failed for another reason.
    #[error("action '{action}' failed: {reason}")]
    Execution {
        /// The failing action.
        action: String,
        /// The failure description.
        reason: String,
    },

    /// Several concurrently executed actions failed.
    #[error("{} parallel actions failed: {}", .0.len(), AggregateErrors(.0))]
    Aggregate(Vec<ActionError>),

    /// An `assert` container's body completed without failing.
    #[error("missing expected {expected} failure")]
    AssertionNotRaised {
        /// Description of the expected failure.
        expected: String,
    },

    /// An `assert` container's body failed differently than expected.
    #[error("expected {expected} failure but caught: {actual}")]
    UnexpectedFailure {
        /// Description of the expected failure.
        expected: String,
        /// The failure actually raised.
        actual: Box<ActionError>,
    },
}

struct AggregateErrors<'a>(&'a [ActionError]);

impl fmt::Display for AggregateErrors<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, error) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl From<EndpointError> for ActionError {
    fn from(err: EndpointError) -> Self {
        match err {
            EndpointError::ReceiveTimeout {
                endpoint,
                timeout_ms,
            } => Self::Timeout {
                action: "receive".to_owned(),
                timeout_ms,
                reason: format!("no message received from endpoint '{endpoint}'"),
            },
            EndpointError::Context(inner) => Self::Context(inner),
            other => Self::Endpoint(other),
        }
    }
}

impl ActionError {
    /// Creates an execution failure.
    #[must_use]
    pub fn execution(action: &str, reason: impl Into<String>) -> Self {
        Self::Execution {
            action: action.to_owned(),
            reason: reason.into(),
        }
    }

    /// Creates a timeout failure.
    #[must_use]
    pub fn timeout(action: &str, timeout: Duration, reason: &str) -> Self {
        Self::Timeout {
            action: action.to_owned(),
            timeout_ms: to_millis(timeout),
            reason: reason.to_owned(),
        }
    }

    /// Combines failures of concurrently run actions. A single failure is
    /// returned unchanged and an empty list yields `Ok(())`.
    ///
    /// # Errors
    ///
    /// Returns the single failure or [`ActionError::Aggregate`].
    pub fn aggregate(mut errors: Vec<Self>) -> ActionResult<()> {
        match errors.len() {
            0 => Ok(()),
            1 => errors.pop().map_or(Ok(()), Err),
            _ => Err(Self::Aggregate(errors)),
        }
    }

    /// Creates a configuration failure.
    #[must_use]
    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::Configuration(reason.into())
    }

    /// Classifies this failure.
    #[must_use]
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Validation(ValidationError::NoValidatorFound(_) | ValidationError::NoScriptValidator(_))
            | Self::Configuration(_) => FailureKind::Configuration,
            Self::Validation(_) | Self::AssertionNotRaised { .. } | Self::UnexpectedFailure { .. } => {
                FailureKind::Validation
            }
            Self::Endpoint(endpoint) => match endpoint {
                EndpointError::InvalidEndpointUri(_)
                | EndpointError::UnknownComponent(_)
                | EndpointError::NoBuilderFound(_)
                | EndpointError::UnknownParameter { .. }
                | EndpointError::InvalidParameter { .. }
                | EndpointError::InvalidSelector(_) => FailureKind::Configuration,
                EndpointError::ReceiveTimeout { .. } => FailureKind::Timeout,
                _ => FailureKind::Execution,
            },
            Self::Context(context) => match context {
                ContextError::UnknownVariable(_)
                | ContextError::UnknownFunction(_)
                | ContextError::UnknownMatcher(_)
                | ContextError::UnresolvedReference(_) => FailureKind::Configuration,
                _ => FailureKind::Execution,
            },
            Self::Timeout { .. } | Self::WaitTimeout { .. } => FailureKind::Timeout,
            Self::Aggregate(errors) => errors
                .first()
                .map_or(FailureKind::Execution, Self::kind),
            Self::Failed(_) | Self::Execution { .. } => FailureKind::Execution,
        }
    }
}
