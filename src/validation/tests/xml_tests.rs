//! Tests for XML validation.

use mockable::DefaultClock;
use rstest::{fixture, rstest};

use crate::context::TestContext;
use crate::message::domain::Message;
use crate::validation::adapters::XmlPayloadValidator;
use crate::validation::domain::{ValidationContext, XmlValidationContext};
use crate::validation::error::ValidationError;
use crate::validation::ports::MessageValidator;

#[fixture]
fn context() -> TestContext {
    TestContext::new()
}

fn xml(payload: &str) -> Message {
    Message::new(payload, &DefaultClock)
}

const ORDER: &str = r#"<order id="17"><customer>ada</customer><items><item>book</item><item>pen</item></items></order>"#;

#[rstest]
fn identical_documents_pass(context: TestContext) {
    assert!(
        XmlPayloadValidator
            .validate_message(&xml(ORDER), &xml(ORDER), &context, &[])
            .is_ok()
    );
}

#[rstest]
fn placeholders_apply_to_text_and_attributes(context: TestContext) {
    context.set_variable("customer", "ada").expect("set");
    let control = r#"<order id="@isNumber()@"><customer>${customer}</customer><items><item>@ignore@</item><item>pen</item></items></order>"#;

    assert!(
        XmlPayloadValidator
            .validate_message(&xml(ORDER), &xml(control), &context, &[])
            .is_ok()
    );
}

#[rstest]
fn text_mismatch_names_the_element(context: TestContext) {
    let control = r#"<order id="17"><customer>bob</customer><items><item>book</item><item>pen</item></items></order>"#;

    let err = XmlPayloadValidator
        .validate_message(&xml(ORDER), &xml(control), &context, &[])
        .expect_err("mismatch");

    assert_eq!(err, ValidationError::mismatch("/order/customer", "bob", "ada"));
}

#[rstest]
fn child_count_mismatch_is_reported(context: TestContext) {
    let control = r#"<order id="17"><customer>ada</customer><items><item>book</item></items></order>"#;

    let err = XmlPayloadValidator
        .validate_message(&xml(ORDER), &xml(control), &context, &[])
        .expect_err("count mismatch");

    assert_eq!(
        err,
        ValidationError::ElementCountMismatch {
            path: "/order/items".to_owned(),
            expected: 1,
            actual: 2,
        }
    );
}

#[rstest]
fn ignored_elements_are_skipped(context: TestContext) {
    let control = r#"<order id="17"><customer>ada</customer><items/></order>"#;
    let contexts = [ValidationContext::Xml(
        XmlValidationContext::default().with_ignored("/order/items"),
    )];

    assert!(
        XmlPayloadValidator
            .validate_message(&xml(ORDER), &xml(control), &context, &contexts)
            .is_ok()
    );
}

#[rstest]
fn element_expressions_are_checked(context: TestContext) {
    let contexts = [ValidationContext::Xml(
        XmlValidationContext::default()
            .with_expression("/order/@id", "17")
            .with_expression("/order/items/item[2]", "pen")
            .with_expression("/order/total", "1"),
    )];

    let err = XmlPayloadValidator
        .validate_message(&xml(ORDER), &xml(""), &context, &contexts)
        .expect_err("missing total");

    assert_eq!(err, ValidationError::MissingElement("/order/total".to_owned()));
}

#[rstest]
fn malformed_xml_is_invalid(context: TestContext) {
    let err = XmlPayloadValidator
        .validate_message(&xml("<order>"), &xml(ORDER), &context, &[])
        .expect_err("malformed");

    assert!(matches!(err, ValidationError::InvalidPayload(_)));
}

#[rstest]
fn unknown_received_attributes_fail(context: TestContext) {
    let received = r#"<order id="17" status="evil"><a>1</a></order>"#;
    let control = r#"<order id="17"><a>1</a></order>"#;

    let err = XmlPayloadValidator
        .validate_message(&xml(received), &xml(control), &context, &[])
        .expect_err("extra attribute");

    assert_eq!(
        err,
        ValidationError::Multiple(vec![
            ValidationError::AttributeCountMismatch {
                path: "/order".to_owned(),
                expected: 1,
                actual: 2,
            },
            ValidationError::UnexpectedAttribute("/order/@status".to_owned()),
        ])
    );
}

#[rstest]
fn namespace_declarations_are_not_attributes(context: TestContext) {
    let received = r#"<ns:order xmlns:ns="urn:orders" id="17"><ns:a>1</ns:a></ns:order>"#;
    let control = r#"<order xmlns="urn:orders" id="17"><a>1</a></order>"#;

    assert!(
        XmlPayloadValidator
            .validate_message(&xml(received), &xml(control), &context, &[])
            .is_ok()
    );
}

#[rstest]
#[case(r#"<order xmlns="urn:wrong"><a>1</a></order>"#, "urn:right", "urn:wrong")]
#[case("<order><a>1</a></order>", "urn:right", "")]
fn namespace_uris_are_compared(
    context: TestContext,
    #[case] received: &str,
    #[case] expected: &str,
    #[case] actual: &str,
) {
    let control = r#"<order xmlns="urn:right"><a>1</a></order>"#;

    let err = XmlPayloadValidator
        .validate_message(&xml(received), &xml(control), &context, &[])
        .expect_err("namespace mismatch");

    assert_eq!(
        err,
        ValidationError::NamespaceMismatch {
            path: "/order".to_owned(),
            expected: expected.to_owned(),
            actual: actual.to_owned(),
        }
    );
}

#[rstest]
fn namespace_present_only_in_received_fails(context: TestContext) {
    let received = r#"<order xmlns="urn:extra"><a>1</a></order>"#;
    let control = "<order><a>1</a></order>";

    let err = XmlPayloadValidator
        .validate_message(&xml(received), &xml(control), &context, &[])
        .expect_err("unexpected namespace");

    assert!(matches!(
        err,
        ValidationError::NamespaceMismatch { ref expected, ref actual, .. }
            if expected.is_empty() && actual == "urn:extra"
    ));
}
