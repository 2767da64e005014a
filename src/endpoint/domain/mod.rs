//! Endpoint domain types: URIs, actors and configuration option tables.

mod actor;
mod options;
mod uri;

pub use actor::{ActorSlot, TestActor};
pub use options::{EndpointOption, EndpointProperties, apply_options, parse_bool, parse_millis};
pub use uri::{ENDPOINT_NAME_PARAMETER, EndpointUri, parse_query};
