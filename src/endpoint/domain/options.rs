//! Declarative configuration tables.
//!
//! Each endpoint type lists the options it understands together with a
//! setter that parses the textual value into its configuration struct.
//! URI parameters and builder properties are both applied through these
//! tables.

use std::collections::BTreeMap;
use std::time::Duration;

use crate::endpoint::error::{EndpointError, EndpointResult};

/// Textual key/value configuration, as found in URIs or property bags.
pub type EndpointProperties = BTreeMap<String, String>;

/// One configurable option of configuration type `C`.
pub struct EndpointOption<C: 'static> {
    /// Option name as it appears in URIs and property bags.
    pub name: &'static str,
    /// Parses the value and stores it in the configuration.
    pub apply: fn(&mut C, &str) -> EndpointResult<()>,
}

/// Applies every entry of `properties` to `config` through `table`.
///
/// # Errors
///
/// Returns [`EndpointError::UnknownParameter`] for entries missing from
/// the table, or the setter's error for unusable values.
pub fn apply_options<C>(
    endpoint: &str,
    config: &mut C,
    table: &[EndpointOption<C>],
    properties: &EndpointProperties,
) -> EndpointResult<()> {
    for (key, value) in properties {
        let option = table
            .iter()
            .find(|option| option.name == key)
            .ok_or_else(|| EndpointError::UnknownParameter {
                endpoint: endpoint.to_owned(),
                parameter: key.clone(),
            })?;
        (option.apply)(config, value)?;
    }
    Ok(())
}

/// Parses a millisecond count.
///
/// # Errors
///
/// Returns [`EndpointError::InvalidParameter`] for non-numeric values.
pub fn parse_millis(parameter: &str, value: &str) -> EndpointResult<Duration> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|err| EndpointError::invalid_parameter(parameter, value, err.to_string()))
}

/// Parses `true` / `false`.
///
/// # Errors
///
/// Returns [`EndpointError::InvalidParameter`] for anything else.
pub fn parse_bool(parameter: &str, value: &str) -> EndpointResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(EndpointError::invalid_parameter(
            parameter,
            value,
            "expected 'true' or 'false'",
        )),
    }
}
