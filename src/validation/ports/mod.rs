//! Validation ports.

mod script;
mod validator;

pub use script::{ScriptSubject, ScriptValidator};
pub use validator::MessageValidator;
