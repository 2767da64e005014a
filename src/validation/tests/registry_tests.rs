//! Tests for validator lookup.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::rstest;
use serde_json::json;

use crate::message::domain::{Message, MessageType};
use crate::validation::adapters::{
    HeaderValidator, JsonPayloadValidator, PlainTextValidator, XmlPayloadValidator,
};
use crate::validation::error::ValidationError;
use crate::validation::services::MessageValidatorRegistry;

fn names(
    registry: &MessageValidatorRegistry,
    message_type: MessageType,
    message: &Message,
) -> Vec<String> {
    registry
        .find(message_type, message, false)
        .expect("validators")
        .iter()
        .map(|validator| validator.name().to_owned())
        .collect()
}

#[rstest]
fn declared_type_selects_payload_validators() {
    let registry = MessageValidatorRegistry::with_defaults();
    let message = Message::new(json!({"id": 1}), &DefaultClock);

    assert_eq!(
        names(&registry, MessageType::Json, &message),
        vec!["header", "json", "json-path", "script"]
    );
}

#[rstest]
#[case("<order/>", "xml")]
#[case("{\"id\": 1}", "json")]
#[case("[1, 2]", "json")]
#[case("hello", "plaintext")]
fn unsupported_type_falls_back_by_sniffing(#[case] payload: &str, #[case] expected: &str) {
    let registry = MessageValidatorRegistry::empty()
        .with_validator(Arc::new(HeaderValidator))
        .with_validator(Arc::new(JsonPayloadValidator))
        .with_validator(Arc::new(XmlPayloadValidator))
        .with_validator(Arc::new(PlainTextValidator));
    let message = Message::new(payload, &DefaultClock);

    let found = names(&registry, MessageType::Binary, &message);

    assert_eq!(found, vec!["header".to_owned(), expected.to_owned()]);
}

#[rstest]
fn empty_payload_uses_generic_validators() {
    let registry = MessageValidatorRegistry::with_defaults();
    let message = Message::new("", &DefaultClock);

    let found = registry
        .find(MessageType::Xml, &message, true)
        .expect("validators");

    assert!(found.iter().any(|validator| validator.name() == "empty"));
}

#[rstest]
fn unknown_payload_needs_fallback_or_fails() {
    let registry = MessageValidatorRegistry::empty()
        .with_validator(Arc::new(HeaderValidator));
    let message = Message::new("hello", &DefaultClock);

    assert_eq!(
        names(&registry, MessageType::Plaintext, &message),
        vec!["header", "default-text-equals"]
    );
    assert_eq!(
        registry
            .find(MessageType::Plaintext, &message, true)
            .map(|found| found.len()),
        Err(ValidationError::NoValidatorFound("plaintext".to_owned()))
    );
}

#[rstest]
fn validators_are_replaced_by_name() {
    let registry = MessageValidatorRegistry::with_defaults().with_validator(Arc::new(HeaderValidator));
    let message = Message::new("x", &DefaultClock);

    assert!(registry.get("header").is_some());
    assert_eq!(
        names(&registry, MessageType::Plaintext, &message),
        vec!["plaintext", "script", "header"]
    );
}
