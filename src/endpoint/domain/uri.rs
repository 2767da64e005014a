//! Endpoint URI parsing.
//!
//! Grammar: `scheme:resource[:more]?key=value&key=value`. The reserved
//! parameter [`ENDPOINT_NAME_PARAMETER`] names the endpoint (and its
//! cache entry) and never reaches the endpoint configuration.

use std::collections::BTreeMap;

use crate::endpoint::error::{EndpointError, EndpointResult};

/// Parameter overriding the endpoint name and cache key.
pub const ENDPOINT_NAME_PARAMETER: &str = "endpointName";

/// A parsed endpoint URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointUri {
    raw: String,
    scheme: String,
    resource: String,
    parameters: BTreeMap<String, String>,
}

impl EndpointUri {
    /// Parses `uri`.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointError::InvalidEndpointUri`] when the URI has
    /// fewer than two `:`-separated tokens or a malformed query.
    ///
    /// # Examples
    ///
    /// ```
    /// use caliper::endpoint::domain::EndpointUri;
    ///
    /// let uri = EndpointUri::parse("direct:sync:orders?timeout=100").expect("valid uri");
    /// assert_eq!(uri.scheme(), "direct");
    /// assert_eq!(uri.resource(), "sync:orders");
    /// assert_eq!(uri.parameters().get("timeout").map(String::as_str), Some("100"));
    /// ```
    pub fn parse(uri: &str) -> EndpointResult<Self> {
        let trimmed = uri.trim();
        let (path, query) = trimmed.split_once('?').unwrap_or((trimmed, ""));
        if path.split(':').filter(|token| !token.is_empty()).count() < 2 {
            return Err(EndpointError::InvalidEndpointUri(uri.to_owned()));
        }
        let (scheme, resource) = path
            .split_once(':')
            .ok_or_else(|| EndpointError::InvalidEndpointUri(uri.to_owned()))?;

        Ok(Self {
            raw: trimmed.to_owned(),
            scheme: scheme.to_owned(),
            resource: resource.to_owned(),
            parameters: parse_query(uri, query)?,
        })
    }

    /// Returns the URI as given.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns the scheme (component name).
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Returns everything between the scheme and the query.
    #[must_use]
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// Returns all query parameters.
    #[must_use]
    pub const fn parameters(&self) -> &BTreeMap<String, String> {
        &self.parameters
    }

    /// Returns the explicit endpoint name, if any.
    #[must_use]
    pub fn endpoint_name(&self) -> Option<&str> {
        self.parameters
            .get(ENDPOINT_NAME_PARAMETER)
            .map(String::as_str)
    }

    /// Returns the query parameters minus the endpoint name.
    #[must_use]
    pub fn configuration_parameters(&self) -> BTreeMap<String, String> {
        self.parameters
            .iter()
            .filter(|(key, _)| key.as_str() != ENDPOINT_NAME_PARAMETER)
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

/// Parses `key=value&key=value` pairs.
///
/// # Errors
///
/// Returns [`EndpointError::InvalidEndpointUri`] for a pair without `=`.
pub fn parse_query(uri: &str, query: &str) -> EndpointResult<BTreeMap<String, String>> {
    query
        .split('&')
        .filter(|pair| !pair.trim().is_empty())
        .map(|pair| {
            pair.split_once('=')
                .map(|(key, value)| (key.trim().to_owned(), value.trim().to_owned()))
                .ok_or_else(|| EndpointError::InvalidEndpointUri(uri.to_owned()))
        })
        .collect()
}
