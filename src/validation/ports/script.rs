//! Script validator port.

use std::fmt;

use crate::context::TestContext;
use crate::message::domain::Message;
use crate::validation::domain::ColumnValues;
use crate::validation::error::ValidationResult;

/// What a validation script inspects.
#[derive(Debug, Clone, Copy)]
pub enum ScriptSubject<'a> {
    /// A received message.
    Message(&'a Message),
    /// A query result set.
    Columns(&'a ColumnValues),
}

/// Evaluates validation scripts of one language.
pub trait ScriptValidator: Send + Sync + fmt::Debug {
    /// Returns `true` if this validator runs scripts of `script_type`.
    fn supports(&self, script_type: &str) -> bool;

    /// Runs `script` against `subject`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::validation::error::ValidationError::ScriptFailed`]
    /// when the script rejects the subject.
    fn validate(
        &self,
        subject: ScriptSubject<'_>,
        script: &str,
        context: &TestContext,
    ) -> ValidationResult<()>;
}
