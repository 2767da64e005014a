//! Port definitions for message retention.

pub mod store;
