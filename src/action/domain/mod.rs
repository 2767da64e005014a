//! Value types shared by actions: message templates, loop and wait
//! conditions.

mod condition;
mod template;
mod wait;

pub use condition::{ContextPredicate, IndexPredicate, LoopCondition};
pub use template::MessageTemplate;
pub use wait::WaitCondition;
