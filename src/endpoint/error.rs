//! Error types for endpoint resolution and message transport.

use std::time::Duration;

use thiserror::Error;

use crate::context::error::ContextError;
use crate::message::error::MessageError;
use crate::settings::to_millis;

/// Result type for endpoint operations.
pub type EndpointResult<T> = Result<T, EndpointError>;

/// Errors raised while resolving endpoints or moving messages through them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EndpointError {
    /// The endpoint URI is malformed and names no bound endpoint.
    #[error("invalid endpoint uri '{0}'")]
    InvalidEndpointUri(String),

    /// No component is registered for the URI scheme.
    #[error("unable to find endpoint component for scheme '{0}'")]
    UnknownComponent(String),

    /// No builder supports the requested endpoint type.
    #[error("unable to find endpoint builder for type '{0}'")]
    NoBuilderFound(String),

    /// A configuration parameter is not supported by the endpoint type.
    #[error("endpoint '{endpoint}' does not support parameter '{parameter}'")]
    UnknownParameter {
        /// Endpoint URI or name.
        endpoint: String,
        /// The unsupported parameter.
        parameter: String,
    },

    /// A configuration parameter has an unusable value.
    #[error("invalid value '{value}' for parameter '{parameter}': {reason}")]
    InvalidParameter {
        /// The parameter name.
        parameter: String,
        /// The rejected value.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A message selector could not be parsed.
    #[error("invalid message selector '{0}'")]
    InvalidSelector(String),

    /// No message arrived before the timeout elapsed.
    #[error("action timeout while receiving message from '{endpoint}' after {timeout_ms} ms")]
    ReceiveTimeout {
        /// The endpoint that was polled.
        endpoint: String,
        /// The timeout in milliseconds.
        timeout_ms: u64,
    },

    /// A synchronous reply was requested without a matching request.
    #[error("no correlated {role} found for endpoint '{endpoint}'")]
    MissingCorrelation {
        /// The endpoint name.
        endpoint: String,
        /// Whether a reply channel or a pending reply is missing.
        role: String,
    },

    /// The other side of a synchronous exchange went away.
    #[error("reply channel of endpoint '{0}' is closed")]
    ReplyChannelClosed(String),

    /// A dispatching adapter found no handler for a request.
    #[error("no endpoint adapter mapped for key '{0}'")]
    NoAdapterMapping(String),

    /// Dynamic content or reference resolution failed.
    #[error(transparent)]
    Context(#[from] ContextError),

    /// The message store failed.
    #[error(transparent)]
    Message(#[from] MessageError),

    /// Shared endpoint state was poisoned by a panicking writer.
    #[error("endpoint state unavailable: {0}")]
    LockPoisoned(String),
}

impl EndpointError {
    /// Creates a receive timeout error.
    #[must_use]
    pub fn receive_timeout(endpoint: &str, timeout: Duration) -> Self {
        Self::ReceiveTimeout {
            endpoint: endpoint.to_owned(),
            timeout_ms: to_millis(timeout),
        }
    }

    /// Creates an invalid parameter error.
    #[must_use]
    pub fn invalid_parameter(parameter: &str, value: &str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            parameter: parameter.to_owned(),
            value: value.to_owned(),
            reason: reason.into(),
        }
    }

    /// Creates a missing correlation error.
    #[must_use]
    pub fn missing_correlation(endpoint: &str, role: &str) -> Self {
        Self::MissingCorrelation {
            endpoint: endpoint.to_owned(),
            role: role.to_owned(),
        }
    }

    pub(crate) fn poisoned(err: impl std::fmt::Display) -> Self {
        Self::LockPoisoned(err.to_string())
    }
}
