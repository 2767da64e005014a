//! Well-known header names.
//!
//! Headers starting with [`INTERNAL_HEADER_PREFIX`] are bookkeeping
//! entries written by the framework itself; header validation skips them.

/// Prefix shared by all framework-internal header names.
pub const INTERNAL_HEADER_PREFIX: &str = "caliper_";

/// Names of the framework-internal headers.
pub struct MessageHeaders;

impl MessageHeaders {
    /// Correlation key attached to synchronous request messages.
    pub const SYNC_CORRELATION_KEY: &'static str = "caliper_sync_correlation_key";
    /// Name of the endpoint a message was received from.
    pub const RECEIVED_FROM: &'static str = "caliper_received_from";
    /// Name of the queue a message was sent to.
    pub const DESTINATION: &'static str = "caliper_destination";
}

/// Returns `true` when `name` is a framework-internal header.
#[must_use]
pub fn is_internal_header(name: &str) -> bool {
    name.starts_with(INTERNAL_HEADER_PREFIX)
}
