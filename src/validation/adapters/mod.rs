//! Built-in message and script validators.

mod binary;
mod default_text;
mod empty;
mod expression_script;
mod header;
mod json;
mod json_path;
mod script;
mod text;
mod xml;

pub use binary::BinaryMessageValidator;
pub use default_text::DefaultTextEqualsValidator;
pub use empty::EmptyMessageValidator;
pub use expression_script::{EXPRESSION_SCRIPT_TYPE, ExpressionScriptValidator};
pub use header::HeaderValidator;
pub use json::JsonPayloadValidator;
pub use json_path::{JsonPathValidator, evaluate_json_path};
pub use script::ScriptMessageValidator;
pub use text::PlainTextValidator;
pub use xml::{XmlPayloadValidator, evaluate_xml_path};

use crate::message::domain::Message;
use crate::validation::error::{ValidationError, ValidationResult};

fn parse_json_payload(message: &Message) -> ValidationResult<serde_json::Value> {
    message
        .payload()
        .to_json()
        .map_err(|err| ValidationError::InvalidPayload(err.to_string()))
}

fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}
