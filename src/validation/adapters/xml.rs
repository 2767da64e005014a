//! XML comparison and element expectations.

use roxmltree::{Attribute, Document, Node};

use crate::context::TestContext;
use crate::context::matchers::is_ignore_placeholder;
use crate::message::domain::{Message, MessageType};
use crate::validation::domain::{ValidationContext, XmlValidationContext};
use crate::validation::error::{ValidationError, ValidationResult};
use crate::validation::ports::MessageValidator;
use crate::validation::rules::validate_value;

/// Evaluates a simple element path against `document`.
///
/// Paths are absolute, `/`-separated element names with optional
/// one-based `[n]` positions; a trailing `@name` selects an attribute.
/// Elements evaluate to their trimmed text content.
///
/// # Examples
///
/// ```
/// use caliper::validation::adapters::evaluate_xml_path;
///
/// let document = roxmltree::Document::parse(
///     "<order id='7'><item>a</item><item>b</item></order>",
/// ).expect("well-formed");
/// assert_eq!(evaluate_xml_path(&document, "/order/item[2]").as_deref(), Some("b"));
/// assert_eq!(evaluate_xml_path(&document, "/order/@id").as_deref(), Some("7"));
/// ```
#[must_use]
pub fn evaluate_xml_path(document: &Document<'_>, path: &str) -> Option<String> {
    let mut segments = path.trim().trim_start_matches('/').split('/').peekable();
    let root = document.root_element();
    let first = segments.next()?;
    let (root_name, root_position) = parse_segment(first)?;
    if root.tag_name().name() != root_name || root_position != 1 {
        return None;
    }

    let mut current = root;
    while let Some(segment) = segments.next() {
        if let Some(attribute) = segment.strip_prefix('@') {
            return if segments.peek().is_none() {
                current.attribute(attribute).map(str::to_owned)
            } else {
                None
            };
        }
        let (name, position) = parse_segment(segment)?;
        current = current
            .children()
            .filter(|child| child.is_element() && child.tag_name().name() == name)
            .nth(position.checked_sub(1)?)?;
    }
    Some(text_content(current))
}

fn parse_segment(segment: &str) -> Option<(&str, usize)> {
    match segment.split_once('[') {
        None => Some((segment, 1)),
        Some((name, rest)) => {
            let position = rest.strip_suffix(']')?.trim().parse().ok()?;
            Some((name, position))
        }
    }
}

fn text_content(node: Node<'_, '_>) -> String {
    node.descendants()
        .filter(Node::is_text)
        .filter_map(|text| text.text())
        .collect::<String>()
        .trim()
        .to_owned()
}

fn parse_document<'a>(text: &'a str) -> ValidationResult<Document<'a>> {
    Document::parse(text).map_err(|err| ValidationError::InvalidPayload(err.to_string()))
}

/// Compares received XML with the control document element by element
/// and checks element path expectations.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlPayloadValidator;

impl MessageValidator for XmlPayloadValidator {
    fn name(&self) -> &'static str {
        "xml"
    }

    fn supports_message_type(&self, message_type: MessageType, _message: &Message) -> bool {
        message_type == MessageType::Xml
    }

    fn validate_message(
        &self,
        received: &Message,
        control: &Message,
        context: &TestContext,
        validation_contexts: &[ValidationContext],
    ) -> ValidationResult<()> {
        let options = validation_contexts
            .iter()
            .find_map(|candidate| match candidate {
                ValidationContext::Xml(xml) => Some(xml.clone()),
                _ => None,
            })
            .unwrap_or_default();
        if control.payload().is_empty() && options.expressions.is_empty() {
            return Ok(());
        }

        let received_text = received.payload().as_text();
        let document = parse_document(&received_text)?;
        let mut comparison = Comparison {
            options: &options,
            context,
            errors: Vec::new(),
        };

        if !control.payload().is_empty() {
            let control_text = control.payload().as_text();
            let control_document = parse_document(&control_text)?;
            let root = control_document.root_element();
            comparison.compare(
                &format!("/{}", root.tag_name().name()),
                document.root_element(),
                root,
            );
        }

        for (path, expected) in &options.expressions {
            match evaluate_xml_path(&document, path) {
                Some(actual) => comparison.check(path, &actual, expected),
                None => comparison
                    .errors
                    .push(ValidationError::MissingElement(path.clone())),
            }
        }

        ValidationError::check(comparison.errors)
    }
}

struct Comparison<'a> {
    options: &'a XmlValidationContext,
    context: &'a TestContext,
    errors: Vec<ValidationError>,
}

impl Comparison<'_> {
    fn check(&mut self, field: &str, actual: &str, control: &str) {
        if let Err(err) = validate_value(field, Some(actual), control, self.context) {
            self.errors.push(err);
        }
    }

    fn compare(&mut self, path: &str, actual: Node<'_, '_>, expected: Node<'_, '_>) {
        if self.options.ignore_paths.contains(path) {
            return;
        }
        if actual.tag_name().name() != expected.tag_name().name() {
            self.errors.push(ValidationError::mismatch(
                path,
                expected.tag_name().name(),
                actual.tag_name().name(),
            ));
            return;
        }

        let expected_namespace = expected.tag_name().namespace();
        let actual_namespace = actual.tag_name().namespace();
        if expected_namespace != actual_namespace {
            self.errors.push(ValidationError::NamespaceMismatch {
                path: path.to_owned(),
                expected: expected_namespace.unwrap_or_default().to_owned(),
                actual: actual_namespace.unwrap_or_default().to_owned(),
            });
            return;
        }

        self.compare_attributes(path, actual, expected);

        let control_children = expected
            .children()
            .filter(Node::is_element)
            .collect::<Vec<_>>();
        let actual_children = actual
            .children()
            .filter(Node::is_element)
            .collect::<Vec<_>>();

        if control_children.is_empty() {
            if actual_children.is_empty() {
                self.check(path, &text_content(actual), &text_content(expected));
            } else if !is_ignore_placeholder(&text_content(expected)) {
                self.errors.push(ValidationError::ElementCountMismatch {
                    path: path.to_owned(),
                    expected: 0,
                    actual: actual_children.len(),
                });
            }
            return;
        }

        if control_children.len() != actual_children.len() {
            self.errors.push(ValidationError::ElementCountMismatch {
                path: path.to_owned(),
                expected: control_children.len(),
                actual: actual_children.len(),
            });
            return;
        }
        for (actual_child, control_child) in actual_children.into_iter().zip(control_children) {
            let child_path = format!("{path}/{}", control_child.tag_name().name());
            self.compare(&child_path, actual_child, control_child);
        }
    }

    /// Namespace declarations are not attributes, so `xmlns` never counts.
    fn compare_attributes(&mut self, path: &str, actual: Node<'_, '_>, expected: Node<'_, '_>) {
        let expected_count = expected.attributes().count();
        let actual_count = actual.attributes().count();
        if expected_count != actual_count {
            self.errors.push(ValidationError::AttributeCountMismatch {
                path: path.to_owned(),
                expected: expected_count,
                actual: actual_count,
            });
        }

        for attribute in actual.attributes() {
            if find_attribute(expected, &attribute).is_none() {
                self.errors.push(ValidationError::UnexpectedAttribute(format!(
                    "{path}/@{}",
                    attribute.name()
                )));
            }
        }

        for attribute in expected.attributes() {
            let field = format!("{path}/@{}", attribute.name());
            match find_attribute(actual, &attribute) {
                Some(value) => self.check(&field, value, attribute.value()),
                None => self.errors.push(ValidationError::MissingElement(field)),
            }
        }
    }
}

fn find_attribute<'a>(node: Node<'a, '_>, like: &Attribute<'_, '_>) -> Option<&'a str> {
    node.attributes()
        .find(|candidate| {
            candidate.name() == like.name() && candidate.namespace() == like.namespace()
        })
        .map(|candidate| candidate.value())
}
