//! The built-in `expression` script language.
//!
//! A script is a list of boolean expressions, one per line. Blank lines
//! and `#` comment lines are skipped. Before evaluation each line
//! has these placeholders substituted, then `${...}` variables and
//! functions resolved:
//!
//! | Placeholder          | Value                                   |
//! |----------------------|-----------------------------------------|
//! | `#{payload}`         | payload text                            |
//! | `#{header:NAME}`     | header value                            |
//! | `#{json:PATH}`       | JSON path result on the payload         |
//! | `#{column:NAME[i]}`  | value `i` of a result set column        |
//! | `#{rows}`            | number of result set rows               |

use crate::context::TestContext;
use crate::context::BooleanExpressionParser;
use crate::message::domain::value_text;
use crate::validation::domain::NULL_VALUE;
use crate::validation::error::{ValidationError, ValidationResult};
use crate::validation::ports::{ScriptSubject, ScriptValidator};
use crate::validation::services::find_column;

use super::evaluate_json_path;

/// Script type handled by [`ExpressionScriptValidator`].
pub const EXPRESSION_SCRIPT_TYPE: &str = "expression";

const OPEN: &str = "#{";
const CLOSE: char = '}';

/// Evaluates line-based boolean expression scripts.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpressionScriptValidator;

impl ScriptValidator for ExpressionScriptValidator {
    fn supports(&self, script_type: &str) -> bool {
        script_type.eq_ignore_ascii_case(EXPRESSION_SCRIPT_TYPE)
    }

    fn validate(
        &self,
        subject: ScriptSubject<'_>,
        script: &str,
        context: &TestContext,
    ) -> ValidationResult<()> {
        for line in script
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !is_comment(line))
        {
            let substituted = substitute(line, subject)?;
            let resolved = context.replace_dynamic_content(&substituted)?;
            if !BooleanExpressionParser::evaluate(&resolved)? {
                return Err(ValidationError::ScriptFailed(format!(
                    "expression '{line}' evaluated to false ('{resolved}')"
                )));
            }
        }
        Ok(())
    }
}

fn is_comment(line: &str) -> bool {
    line.starts_with('#') && !line.starts_with(OPEN)
}

fn substitute(line: &str, subject: ScriptSubject<'_>) -> ValidationResult<String> {
    let mut output = String::with_capacity(line.len());
    let mut rest = line;
    while let Some(start) = rest.find(OPEN) {
        let (before, tail) = rest.split_at(start);
        output.push_str(before);
        let body = tail.get(OPEN.len()..).unwrap_or_default();
        let end = body.find(CLOSE).ok_or_else(|| {
            ValidationError::ScriptFailed(format!("unclosed placeholder in '{line}'"))
        })?;
        let (key, after) = body.split_at(end);
        output.push_str(&lookup(key.trim(), subject)?);
        rest = after.get(1..).unwrap_or_default();
    }
    output.push_str(rest);
    Ok(output)
}

fn lookup(key: &str, subject: ScriptSubject<'_>) -> ValidationResult<String> {
    let unsupported = || ValidationError::ScriptFailed(format!("unsupported placeholder '{key}'"));
    match subject {
        ScriptSubject::Message(message) => {
            if key == "payload" {
                return Ok(message.payload().as_text().into_owned());
            }
            if let Some(name) = key.strip_prefix("header:") {
                return message
                    .header(name)
                    .map(value_text)
                    .ok_or_else(|| ValidationError::MissingHeader(name.to_owned()));
            }
            if let Some(path) = key.strip_prefix("json:") {
                let document = message
                    .payload()
                    .to_json()
                    .map_err(|err| ValidationError::InvalidPayload(err.to_string()))?;
                return evaluate_json_path(&document, path)
                    .map(|value| value_text(&value))
                    .ok_or_else(|| ValidationError::MissingElement(path.to_owned()));
            }
            Err(unsupported())
        }
        ScriptSubject::Columns(columns) => {
            if key == "rows" {
                return Ok(columns
                    .values()
                    .next()
                    .map_or(0, Vec::len)
                    .to_string());
            }
            let Some(reference) = key.strip_prefix("column:") else {
                return Err(unsupported());
            };
            let (name, index) = match reference.split_once('[') {
                Some((name, position)) => (
                    name,
                    position
                        .strip_suffix(']')
                        .and_then(|value| value.trim().parse::<usize>().ok())
                        .ok_or_else(unsupported)?,
                ),
                None => (reference, 0),
            };
            let values = find_column(columns, name)
                .ok_or_else(|| ValidationError::ColumnNotFound(name.to_owned()))?;
            let value = values
                .get(index)
                .ok_or_else(|| ValidationError::MissingElement(format!("{name}[{index}]")))?;
            Ok(value.clone().unwrap_or_else(|| NULL_VALUE.to_owned()))
        }
    }
}
