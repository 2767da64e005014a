//! Boolean expressions used by loop, conditional and script constructs.
//!
//! Supported syntax: numeric comparisons (`lt`, `lt=`, `gt`, `gt=`, `<`,
//! `<=`, `>`, `>=`, `=`), logical `and` / `or` (`and` binds tighter),
//! parentheses and the literals `true` / `false`. `=` falls back to text
//! comparison when either side is not numeric; single quotes delimit
//! text operands.

use std::cmp::Ordering;
use std::iter::Peekable;
use std::str::Chars;

use super::error::{ContextError, ContextResult};

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Open,
    Close,
    Operator(String),
    Operand(String),
}

#[derive(Debug, Clone, PartialEq)]
enum Term {
    Bool(bool),
    Text(String),
}

impl Term {
    fn text(&self) -> String {
        match self {
            Self::Bool(value) => value.to_string(),
            Self::Text(value) => value.clone(),
        }
    }
}

const WORD_OPERATORS: &[&str] = &["lt", "lt=", "gt", "gt=", "and", "or"];

/// Evaluates boolean expressions.
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanExpressionParser;

impl BooleanExpressionParser {
    /// Evaluates `expression`.
    ///
    /// # Errors
    ///
    /// Returns [`ContextError::InvalidExpression`] for syntax errors,
    /// non-numeric operands of ordering comparisons, or an expression
    /// that does not produce a boolean.
    ///
    /// # Examples
    ///
    /// ```
    /// use caliper::context::BooleanExpressionParser;
    ///
    /// assert!(BooleanExpressionParser::evaluate("(1 lt 2) and 3 gt= 3").expect("valid"));
    /// assert!(!BooleanExpressionParser::evaluate("4 = 5 or false").expect("valid"));
    /// ```
    pub fn evaluate(expression: &str) -> ContextResult<bool> {
        let tokens = tokenize(expression);
        let mut parser = Parser {
            expression,
            tokens: &tokens,
            position: 0,
        };
        let result = parser.or()?;
        if parser.position != tokens.len() {
            return Err(ContextError::invalid_expression(expression, "unexpected trailing tokens"));
        }
        match result {
            Term::Bool(value) => Ok(value),
            Term::Text(text) => Err(ContextError::invalid_expression(
                expression,
                format!("'{text}' is not a boolean"),
            )),
        }
    }
}

fn tokenize(expression: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars = expression.chars().peekable();

    while let Some(&ch) = chars.peek() {
        match ch {
            c if c.is_whitespace() => {
                chars.next();
            }
            '(' => {
                chars.next();
                tokens.push(Token::Open);
            }
            ')' => {
                chars.next();
                tokens.push(Token::Close);
            }
            '<' | '>' | '=' => tokens.push(Token::Operator(take_while(&mut chars, |c| {
                matches!(c, '<' | '>' | '=')
            }))),
            '\'' => {
                chars.next();
                let text = take_while(&mut chars, |c| c != '\'');
                chars.next();
                tokens.push(Token::Operand(text));
            }
            _ => {
                let mut word = take_while(&mut chars, |c| {
                    !c.is_whitespace() && !matches!(c, '(' | ')' | '<' | '>' | '=' | '\'')
                });
                let lower = word.to_ascii_lowercase();
                if (lower == "lt" || lower == "gt") && chars.peek() == Some(&'=') {
                    chars.next();
                    word.push('=');
                }
                let normalised = word.to_ascii_lowercase();
                if WORD_OPERATORS.contains(&normalised.as_str()) {
                    tokens.push(Token::Operator(normalised));
                } else {
                    tokens.push(Token::Operand(word));
                }
            }
        }
    }

    tokens
}

fn take_while(chars: &mut Peekable<Chars<'_>>, keep: impl Fn(char) -> bool) -> String {
    let mut taken = String::new();
    while let Some(&ch) = chars.peek() {
        if !keep(ch) {
            break;
        }
        taken.push(ch);
        chars.next();
    }
    taken
}

struct Parser<'a> {
    expression: &'a str,
    tokens: &'a [Token],
    position: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    fn advance(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.position);
        self.position += 1;
        token
    }

    fn next_is_operator(&self, names: &[&str]) -> Option<String> {
        match self.peek() {
            Some(Token::Operator(op)) if names.contains(&op.as_str()) => Some(op.clone()),
            _ => None,
        }
    }

    fn or(&mut self) -> ContextResult<Term> {
        let mut left = self.and()?;
        while self.next_is_operator(&["or"]).is_some() {
            self.position += 1;
            let right = self.and()?;
            left = Term::Bool(self.boolean(&left)? || self.boolean(&right)?);
        }
        Ok(left)
    }

    fn and(&mut self) -> ContextResult<Term> {
        let mut left = self.comparison()?;
        while self.next_is_operator(&["and"]).is_some() {
            self.position += 1;
            let right = self.comparison()?;
            left = Term::Bool(self.boolean(&left)? && self.boolean(&right)?);
        }
        Ok(left)
    }

    fn comparison(&mut self) -> ContextResult<Term> {
        let left = self.primary()?;
        let Some(operator) =
            self.next_is_operator(&["lt", "lt=", "gt", "gt=", "<", "<=", ">", ">=", "="])
        else {
            return Ok(left);
        };
        self.position += 1;
        let right = self.primary()?;

        if operator == "=" {
            let equal = match (number(&left), number(&right)) {
                (Some(a), Some(b)) => a.total_cmp(&b) == Ordering::Equal,
                _ => left.text() == right.text(),
            };
            return Ok(Term::Bool(equal));
        }

        let (Some(a), Some(b)) = (number(&left), number(&right)) else {
            return Err(ContextError::invalid_expression(
                self.expression,
                format!(
                    "operator '{operator}' needs numeric operands, got '{}' and '{}'",
                    left.text(),
                    right.text()
                ),
            ));
        };
        let ordering = a.total_cmp(&b);
        let outcome = match operator.as_str() {
            "lt" | "<" => ordering == Ordering::Less,
            "lt=" | "<=" => ordering != Ordering::Greater,
            "gt" | ">" => ordering == Ordering::Greater,
            _ => ordering != Ordering::Less,
        };
        Ok(Term::Bool(outcome))
    }

    fn primary(&mut self) -> ContextResult<Term> {
        let expression = self.expression;
        match self.advance().cloned() {
            Some(Token::Open) => {
                let inner = self.or()?;
                match self.advance() {
                    Some(Token::Close) => Ok(inner),
                    _ => Err(ContextError::invalid_expression(expression, "missing ')'")),
                }
            }
            Some(Token::Operand(text)) => Ok(match text.to_ascii_lowercase().as_str() {
                "true" => Term::Bool(true),
                "false" => Term::Bool(false),
                _ => Term::Text(text),
            }),
            Some(other) => Err(ContextError::invalid_expression(
                expression,
                format!("unexpected token {other:?}"),
            )),
            None => Err(ContextError::invalid_expression(expression, "unexpected end")),
        }
    }

    fn boolean(&self, term: &Term) -> ContextResult<bool> {
        match term {
            Term::Bool(value) => Ok(*value),
            Term::Text(text) => Err(ContextError::invalid_expression(
                self.expression,
                format!("'{text}' is not a boolean"),
            )),
        }
    }
}

fn number(term: &Term) -> Option<f64> {
    match term {
        Term::Text(text) => text.trim().parse::<f64>().ok(),
        Term::Bool(_) => None,
    }
}
