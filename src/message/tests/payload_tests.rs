//! Unit tests for payload conversion and message types.

use crate::message::domain::{MessageType, Payload};
use crate::message::error::MessageError;
use rstest::rstest;
use serde_json::json;

#[rstest]
fn json_payload_renders_compact_text() {
    let payload = Payload::json(json!({"a": [1, 2]}));
    assert_eq!(payload.as_text(), r#"{"a":[1,2]}"#);
}

#[rstest]
fn text_payload_parses_to_json() {
    let payload = Payload::text(r#"{"id": 7}"#);
    assert_eq!(payload.to_json().expect("json"), json!({"id": 7}));
}

#[rstest]
fn invalid_json_text_is_rejected() {
    let payload = Payload::text("<xml/>");
    assert!(matches!(payload.to_json(), Err(MessageError::InvalidJson(_))));
}

#[rstest]
fn empty_payload_has_no_json() {
    assert_eq!(Payload::Empty.to_json(), Err(MessageError::EmptyPayload));
}

#[rstest]
fn binary_payload_renders_base64() {
    let payload = Payload::binary(b"hi".to_vec());
    assert_eq!(payload.as_text(), "aGk=");
    assert_eq!(payload.to_bytes(), b"hi".to_vec());
}

#[rstest]
#[case(Payload::Empty, true)]
#[case(Payload::text("   "), true)]
#[case(Payload::text("x"), false)]
#[case(Payload::binary(Vec::new()), true)]
#[case(Payload::json(json!(null)), false)]
fn emptiness(#[case] payload: Payload, #[case] expected: bool) {
    assert_eq!(payload.is_empty(), expected);
}

#[rstest]
#[case(Payload::text("  <root/>"), Some('<'))]
#[case(Payload::text("[1]"), Some('['))]
#[case(Payload::json(json!({"k": 1})), Some('{'))]
#[case(Payload::Empty, None)]
fn leading_char_sniffing(#[case] payload: Payload, #[case] expected: Option<char>) {
    assert_eq!(payload.leading_char(), expected);
}

#[rstest]
#[case("XML", MessageType::Xml)]
#[case("json", MessageType::Json)]
#[case("plaintext", MessageType::Plaintext)]
#[case("binary", MessageType::Binary)]
fn message_type_parses_case_insensitively(#[case] name: &str, #[case] expected: MessageType) {
    assert_eq!(name.parse::<MessageType>().expect("known type"), expected);
}

#[rstest]
fn unknown_message_type_is_rejected() {
    let result = "yaml".parse::<MessageType>();
    assert_eq!(result, Err(MessageError::UnknownMessageType("yaml".to_owned())));
}
