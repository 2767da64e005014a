//! Domain types for the message envelope.

mod headers;
mod ids;
mod message;
mod message_type;
mod payload;

pub use headers::{INTERNAL_HEADER_PREFIX, MessageHeaders, is_internal_header};
pub use ids::MessageId;
pub use message::{Message, MessageBuilder};
pub(crate) use message::value_text;
pub use message_type::MessageType;
pub use payload::Payload;
