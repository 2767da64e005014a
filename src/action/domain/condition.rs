//! Loop conditions for iterating containers.

use std::fmt;
use std::sync::Arc;

use crate::action::error::ActionResult;
use crate::context::matchers::is_matcher_expression;
use crate::context::{BooleanExpressionParser, TestContext};
use crate::validation::error::ValidationError;

/// Predicate over the test context.
pub type ContextPredicate = Arc<dyn Fn(&TestContext) -> bool + Send + Sync>;

/// Predicate over the loop index and the test context.
pub type IndexPredicate = Arc<dyn Fn(u64, &TestContext) -> bool + Send + Sync>;

/// Decides whether a loop keeps iterating (`iterate`) or stops
/// (`repeat`).
#[derive(Clone)]
pub enum LoopCondition {
    /// A boolean expression such as `i lt= 3` or a matcher expression
    /// such as `@greaterThan(3)@` applied to the index.
    Expression(String),
    /// A closure.
    Predicate(IndexPredicate),
}

impl LoopCondition {
    /// Creates an expression condition.
    #[must_use]
    pub fn expression(expression: impl Into<String>) -> Self {
        Self::Expression(expression.into())
    }

    /// Creates a closure condition.
    #[must_use]
    pub fn predicate<F>(predicate: F) -> Self
    where
        F: Fn(u64, &TestContext) -> bool + Send + Sync + 'static,
    {
        Self::Predicate(Arc::new(predicate))
    }

    /// Evaluates the condition for `index`.
    ///
    /// Expressions have `${<index_name>}` and then the bare index name
    /// replaced by the index value before dynamic content is resolved
    /// and the result is parsed as a boolean expression.
    ///
    /// # Errors
    ///
    /// Returns resolution or expression syntax failures.
    pub fn evaluate(&self, index_name: &str, index: u64, context: &TestContext) -> ActionResult<bool> {
        match self {
            Self::Predicate(predicate) => Ok(predicate(index, context)),
            Self::Expression(expression) => {
                let substituted = substitute_index(expression, index_name, index);
                let resolved = context.replace_dynamic_content(&substituted)?;
                if is_matcher_expression(&resolved) {
                    return match context.matcher_registry().validate_expression(
                        index_name,
                        &index.to_string(),
                        &resolved,
                        context,
                    ) {
                        Ok(()) => Ok(true),
                        Err(ValidationError::MatcherFailed { .. }) => Ok(false),
                        Err(err) => Err(err.into()),
                    };
                }
                Ok(BooleanExpressionParser::evaluate(&resolved)?)
            }
        }
    }
}

fn substitute_index(expression: &str, index_name: &str, index: u64) -> String {
    let value = index.to_string();
    let replaced = expression.replace(&format!("${{{index_name}}}"), &value);

    let mut output = String::with_capacity(replaced.len());
    let mut word = String::new();
    for ch in replaced.chars() {
        if ch.is_alphanumeric() || ch == '_' || ch == '.' {
            word.push(ch);
            continue;
        }
        flush_word(&mut output, &mut word, index_name, &value);
        output.push(ch);
    }
    flush_word(&mut output, &mut word, index_name, &value);
    output
}

fn flush_word(output: &mut String, word: &mut String, index_name: &str, value: &str) {
    if word.as_str() == index_name {
        output.push_str(value);
    } else {
        output.push_str(word);
    }
    word.clear();
}

impl fmt::Debug for LoopCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expression(expression) => f.debug_tuple("Expression").field(expression).finish(),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::substitute_index;

    #[rstest]
    #[case("i lt= 3", "2 lt= 3")]
    #[case("${i} = 2", "2 = 2")]
    #[case("index gt 1 and i lt 5", "index gt 1 and 2 lt 5")]
    fn replaces_index_references(#[case] expression: &str, #[case] expected: &str) {
        assert_eq!(substitute_index(expression, "i", 2), expected);
    }
}
