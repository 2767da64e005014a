//! Function libraries callable from dynamic content.
//!
//! A call looks like `citrus:concat('Hello ', ${name})`: a library prefix,
//! the function name and a comma separated argument list. Quoted
//! arguments are taken literally; an argument that is itself a function
//! call is evaluated once before the outer call.

mod library;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

pub use library::default_library;

use super::TestContext;
use super::error::{ContextError, ContextResult};

/// A function callable from dynamic content.
pub trait Function: Send + Sync {
    /// Executes the function with already resolved arguments.
    ///
    /// # Errors
    ///
    /// Returns [`ContextError::FunctionFailed`] for invalid arguments.
    fn execute(&self, params: &[String], context: &TestContext) -> ContextResult<String>;
}

impl<F> Function for F
where
    F: Fn(&[String], &TestContext) -> ContextResult<String> + Send + Sync,
{
    fn execute(&self, params: &[String], context: &TestContext) -> ContextResult<String> {
        self(params, context)
    }
}

/// Named group of functions sharing a call prefix.
#[derive(Clone)]
pub struct FunctionLibrary {
    name: String,
    prefix: String,
    functions: HashMap<String, Arc<dyn Function>>,
}

impl FunctionLibrary {
    /// Creates an empty library. `prefix` must end with `:`.
    #[must_use]
    pub fn new(name: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prefix: prefix.into(),
            functions: HashMap::new(),
        }
    }

    /// Adds a function under `name`.
    #[must_use]
    pub fn with_function(mut self, name: impl Into<String>, function: impl Function + 'static) -> Self {
        self.functions.insert(name.into(), Arc::new(function));
        self
    }

    /// Returns the library name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the call prefix.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns `true` if a function named `name` is part of this library.
    #[must_use]
    pub fn knows(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    fn function(&self, name: &str) -> ContextResult<&Arc<dyn Function>> {
        self.functions
            .get(name)
            .ok_or_else(|| ContextError::UnknownFunction(format!("{}{name}", self.prefix)))
    }
}

impl fmt::Debug for FunctionLibrary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names = self.functions.keys().collect::<Vec<_>>();
        names.sort();
        f.debug_struct("FunctionLibrary")
            .field("name", &self.name)
            .field("prefix", &self.prefix)
            .field("functions", &names)
            .finish()
    }
}

/// All function libraries known to a context.
#[derive(Debug, Clone, Default)]
pub struct FunctionRegistry {
    libraries: Vec<FunctionLibrary>,
}

impl FunctionRegistry {
    /// Creates a registry holding the default library under `prefix`.
    #[must_use]
    pub fn with_default_library(prefix: &str) -> Self {
        Self::default().with_library(default_library(prefix))
    }

    /// Adds a library.
    #[must_use]
    pub fn with_library(mut self, library: FunctionLibrary) -> Self {
        self.libraries.push(library);
        self
    }

    /// Returns the registered libraries.
    #[must_use]
    pub fn libraries(&self) -> &[FunctionLibrary] {
        &self.libraries
    }

    /// Returns `true` if `expression` starts with a known library prefix
    /// and contains an argument list.
    #[must_use]
    pub fn is_function(&self, expression: &str) -> bool {
        let trimmed = expression.trim();
        self.libraries
            .iter()
            .any(|library| trimmed.starts_with(library.prefix()) && trimmed.contains('('))
    }

    /// Evaluates a single call expression such as `citrus:upperCase('x')`.
    ///
    /// # Errors
    ///
    /// Returns [`ContextError::UnknownFunction`] for unregistered names,
    /// [`ContextError::InvalidFunctionCall`] for malformed expressions and
    /// whatever the function itself reports.
    pub fn resolve(&self, expression: &str, context: &TestContext) -> ContextResult<String> {
        let trimmed = expression.trim();
        let library = self
            .libraries
            .iter()
            .find(|library| trimmed.starts_with(library.prefix()))
            .ok_or_else(|| ContextError::UnknownFunction(trimmed.to_owned()))?;

        let call = trimmed.strip_prefix(library.prefix()).unwrap_or(trimmed);
        let open = call
            .find('(')
            .ok_or_else(|| invalid_call(trimmed, "missing '('"))?;
        let (name, arguments) = call.split_at(open);
        let inner = arguments
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| invalid_call(trimmed, "missing ')'"))?;

        let function = library.function(name.trim())?;
        let params = split_arguments(inner)
            .into_iter()
            .map(|param| self.resolve_argument(&param, context))
            .collect::<ContextResult<Vec<_>>>()?;

        function.execute(&params, context)
    }

    /// Replaces every function call found in `text` with its result.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`FunctionRegistry::resolve`].
    pub fn replace_functions(&self, text: &str, context: &TestContext) -> ContextResult<String> {
        let mut out = String::with_capacity(text.len());
        let mut rest = text;

        while let Some((start, end)) = self.next_call(rest)? {
            let (before, from_call) = rest.split_at(start);
            let (call, tail) = from_call.split_at(end - start);
            out.push_str(before);
            out.push_str(&self.resolve(call, context)?);
            rest = tail;
        }

        out.push_str(rest);
        Ok(out)
    }

    fn resolve_argument(&self, param: &str, context: &TestContext) -> ContextResult<String> {
        let trimmed = param.trim();
        if let Some(literal) = trimmed
            .strip_prefix('\'')
            .and_then(|rest| rest.strip_suffix('\''))
        {
            return Ok(literal.to_owned());
        }
        if self.is_function(trimmed) {
            return self.resolve(trimmed, context);
        }
        Ok(trimmed.to_owned())
    }

    /// Finds the byte span of the first complete call in `text`.
    fn next_call(&self, text: &str) -> ContextResult<Option<(usize, usize)>> {
        let mut earliest: Option<(usize, usize)> = None;

        for library in &self.libraries {
            let mut offset = 0;
            while let Some(found) = text.get(offset..).and_then(|rest| rest.find(library.prefix())) {
                let start = offset + found;
                let after_prefix = start + library.prefix().len();
                let name_len = text
                    .get(after_prefix..)
                    .map(|rest| {
                        rest.chars()
                            .take_while(|ch| ch.is_ascii_alphanumeric() || *ch == '_')
                            .count()
                    })
                    .unwrap_or_default();
                let open = after_prefix + name_len;

                if name_len > 0 && text.get(open..).is_some_and(|rest| rest.starts_with('(')) {
                    let close = matching_paren(text, open)
                        .ok_or_else(|| invalid_call(text, "unbalanced parentheses"))?;
                    if earliest.is_none_or(|(current, _)| start < current) {
                        earliest = Some((start, close + 1));
                    }
                    break;
                }
                offset = after_prefix;
            }
        }

        Ok(earliest)
    }
}

/// Returns the index of the `)` closing the `(` at `open`.
fn matching_paren(text: &str, open: usize) -> Option<usize> {
    let mut depth = 0_usize;
    let mut quoted = false;
    for (idx, ch) in text.char_indices().skip_while(|(idx, _)| *idx < open) {
        match ch {
            '\'' => quoted = !quoted,
            '(' if !quoted => depth += 1,
            ')' if !quoted => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(idx);
                }
            }
            _ => {}
        }
    }
    None
}

/// Splits an argument list at top-level commas.
pub(crate) fn split_arguments(arguments: &str) -> Vec<String> {
    if arguments.trim().is_empty() {
        return Vec::new();
    }

    let mut params = Vec::new();
    let mut current = String::new();
    let mut depth = 0_usize;
    let mut quoted = false;

    for ch in arguments.chars() {
        match ch {
            '\'' => {
                quoted = !quoted;
                current.push(ch);
            }
            '(' if !quoted => {
                depth += 1;
                current.push(ch);
            }
            ')' if !quoted => {
                depth = depth.saturating_sub(1);
                current.push(ch);
            }
            ',' if !quoted && depth == 0 => {
                params.push(current.trim().to_owned());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    params.push(current.trim().to_owned());
    params
}

fn invalid_call(expression: &str, reason: &str) -> ContextError {
    ContextError::InvalidFunctionCall {
        expression: expression.to_owned(),
        reason: reason.to_owned(),
    }
}
