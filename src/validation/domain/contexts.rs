//! Validation contexts: per-receive instructions for validators.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Instructions attached to a receive or query action.
///
/// Each validator picks the variants it understands and ignores the rest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationContext {
    /// Header comparison options.
    Header(HeaderValidationContext),
    /// Whole-document JSON comparison options.
    Json(JsonValidationContext),
    /// JSON path expectations.
    JsonPath(JsonPathValidationContext),
    /// Whole-document XML comparison options and element expectations.
    Xml(XmlValidationContext),
    /// Plain-text comparison options.
    Text(TextValidationContext),
    /// A validation script.
    Script(ScriptValidationContext),
}

/// Header comparison options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderValidationContext {
    /// Match header names case-insensitively.
    pub ignore_case: bool,
    /// Headers that must not be present.
    pub absent: BTreeSet<String>,
}

impl HeaderValidationContext {
    /// Requires `header` to be absent.
    #[must_use]
    pub fn with_absent(mut self, header: impl Into<String>) -> Self {
        self.absent.insert(header.into());
        self
    }

    /// Enables case-insensitive header names.
    #[must_use]
    pub const fn ignoring_case(mut self) -> Self {
        self.ignore_case = true;
        self
    }
}

/// Whole-document JSON comparison options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JsonValidationContext {
    /// Reject received fields and array elements missing from the control.
    pub strict: bool,
    /// Paths (`$.a.b`) excluded from comparison.
    pub ignore_paths: BTreeSet<String>,
}

impl Default for JsonValidationContext {
    fn default() -> Self {
        Self {
            strict: true,
            ignore_paths: BTreeSet::new(),
        }
    }
}

impl JsonValidationContext {
    /// Non-strict comparison.
    #[must_use]
    pub fn lenient() -> Self {
        Self {
            strict: false,
            ..Self::default()
        }
    }

    /// Excludes `path` from comparison.
    #[must_use]
    pub fn with_ignored(mut self, path: impl Into<String>) -> Self {
        self.ignore_paths.insert(path.into());
        self
    }
}

/// Expected values by JSON path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JsonPathValidationContext {
    /// Path (`$.items[0].id`, `$.items.size()`) to control value.
    pub expressions: BTreeMap<String, String>,
}

impl JsonPathValidationContext {
    /// Adds an expectation.
    #[must_use]
    pub fn with_expression(mut self, path: impl Into<String>, expected: impl Into<String>) -> Self {
        self.expressions.insert(path.into(), expected.into());
        self
    }
}

/// XML comparison options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct XmlValidationContext {
    /// Element paths (`/order/id`) excluded from comparison.
    pub ignore_paths: BTreeSet<String>,
    /// Element path or `path/@attribute` to control value.
    pub expressions: BTreeMap<String, String>,
}

impl XmlValidationContext {
    /// Excludes `path` from comparison.
    #[must_use]
    pub fn with_ignored(mut self, path: impl Into<String>) -> Self {
        self.ignore_paths.insert(path.into());
        self
    }

    /// Adds an element expectation.
    #[must_use]
    pub fn with_expression(mut self, path: impl Into<String>, expected: impl Into<String>) -> Self {
        self.expressions.insert(path.into(), expected.into());
        self
    }
}

/// Plain-text comparison options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextValidationContext {
    /// Collapse runs of whitespace before comparing.
    pub ignore_whitespace: bool,
    /// Treat `\r\n` and `\n` alike.
    pub ignore_newline_type: bool,
}

impl Default for TextValidationContext {
    fn default() -> Self {
        Self {
            ignore_whitespace: false,
            ignore_newline_type: true,
        }
    }
}

/// A script evaluated against the received message or result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptValidationContext {
    /// Script language.
    pub script_type: String,
    /// Script source.
    pub script: String,
    /// Name of the script validator bound in the reference resolver.
    pub validator: Option<String>,
}

impl ScriptValidationContext {
    /// Creates a context for `script` in `script_type`.
    #[must_use]
    pub fn new(script_type: impl Into<String>, script: impl Into<String>) -> Self {
        Self {
            script_type: script_type.into(),
            script: script.into(),
            validator: None,
        }
    }

    /// Names the validator to use.
    #[must_use]
    pub fn with_validator(mut self, name: impl Into<String>) -> Self {
        self.validator = Some(name.into());
        self
    }
}
