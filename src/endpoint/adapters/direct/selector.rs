//! Header-based message selectors: `key = 'value' AND other = 'x'`.

use crate::endpoint::error::{EndpointError, EndpointResult};
use crate::message::domain::Message;

/// Conjunction of header equality checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageSelector {
    criteria: Vec<(String, String)>,
}

impl MessageSelector {
    /// Parses a selector expression.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointError::InvalidSelector`] for clauses that are not
    /// of the form `key = 'value'`.
    ///
    /// # Examples
    ///
    /// ```
    /// use caliper::endpoint::adapters::direct::MessageSelector;
    ///
    /// let selector = MessageSelector::parse("operation = 'order' AND region = 'eu'")
    ///     .expect("valid selector");
    /// assert_eq!(selector.criteria().len(), 2);
    /// ```
    pub fn parse(expression: &str) -> EndpointResult<Self> {
        let invalid = || EndpointError::InvalidSelector(expression.to_owned());
        let criteria = split_conjunction(expression)
            .into_iter()
            .map(|clause| {
                let (raw_key, raw_value) = clause.split_once('=').ok_or_else(invalid)?;
                let key = raw_key.trim();
                let value = raw_value.trim();
                let unquoted = value
                    .strip_prefix('\'')
                    .and_then(|rest| rest.strip_suffix('\''))
                    .unwrap_or(value);
                if key.is_empty() {
                    return Err(invalid());
                }
                Ok((key.to_owned(), unquoted.to_owned()))
            })
            .collect::<EndpointResult<Vec<_>>>()?;
        if criteria.is_empty() {
            return Err(invalid());
        }
        Ok(Self { criteria })
    }

    /// The parsed `(header, value)` pairs.
    #[must_use]
    pub fn criteria(&self) -> &[(String, String)] {
        &self.criteria
    }

    /// Returns `true` if every criterion matches a header of `message`.
    #[must_use]
    pub fn matches(&self, message: &Message) -> bool {
        self.criteria
            .iter()
            .all(|(key, value)| message.header_text(key).as_deref() == Some(value.as_str()))
    }
}

fn split_conjunction(expression: &str) -> Vec<&str> {
    let mut clauses = Vec::new();
    let mut rest = expression;
    loop {
        let lower = rest.to_ascii_lowercase();
        match lower.find(" and ") {
            Some(index) => {
                let (clause, tail) = rest.split_at(index);
                clauses.push(clause);
                rest = tail.get(" and ".len()..).unwrap_or_default();
            }
            None => {
                clauses.push(rest);
                break;
            }
        }
    }
    clauses
        .into_iter()
        .filter(|clause| !clause.trim().is_empty())
        .collect()
}
