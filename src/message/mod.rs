//! Message envelope exchanged between test actions and endpoints.
//!
//! A [`domain::Message`] carries a payload, a header map and metadata
//! (identifier, optional name, creation timestamp). Messages are never
//! mutated in place: derived messages are produced through copy
//! construction or the `with_*` builder methods.
//!
//! # Architecture
//!
//! - **Domain**: [`domain::Message`], [`domain::Payload`], [`domain::MessageType`]
//! - **Ports**: [`ports::store::MessageStore`] for named message retention
//! - **Adapters**: [`adapters::memory::InMemoryMessageStore`]
//!
//! # Example
//!
//! ```
//! use caliper::message::domain::{Message, Payload};
//! use mockable::DefaultClock;
//! use serde_json::json;
//!
//! let clock = DefaultClock;
//! let original = Message::builder(Payload::text("<ping/>"))
//!     .with_header("operation", json!("ping"))
//!     .build(&clock);
//!
//! let copy = Message::copy_of(&original, &clock);
//! assert_ne!(copy.id(), original.id());
//! assert_eq!(copy.headers(), original.headers());
//! ```

pub mod adapters;
pub mod domain;
pub mod error;
pub mod ports;

#[cfg(test)]
mod tests;
