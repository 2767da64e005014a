//! Variable creation and tracing.

use async_trait::async_trait;
use tracing::info;

use crate::action::error::ActionResult;
use crate::action::ports::TestAction;
use crate::context::TestContext;

/// Creates variables in declaration order.
///
/// Values are resolved before they are stored, so a later variable can
/// refer to an earlier one.
#[derive(Debug, Clone, Default)]
pub struct CreateVariablesAction {
    variables: Vec<(String, String)>,
}

impl CreateVariablesAction {
    /// Creates an action without variables.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a variable.
    #[must_use]
    pub fn with_variable(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.push((name.into(), value.into()));
        self
    }
}

#[async_trait]
impl TestAction for CreateVariablesAction {
    fn name(&self) -> &'static str {
        "create-variables"
    }

    async fn execute(&self, context: &TestContext) -> ActionResult<()> {
        for (name, value) in &self.variables {
            let resolved = context.replace_dynamic_content(value)?;
            info!(variable = %name, value = %resolved, "setting variable");
            context.set_variable(name, resolved)?;
        }
        Ok(())
    }
}

/// Logs variables: the named ones, or all of them.
#[derive(Debug, Clone, Default)]
pub struct TraceVariablesAction {
    names: Vec<String>,
}

impl TraceVariablesAction {
    /// Traces all variables.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Traces only `names`.
    #[must_use]
    pub fn of<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl TestAction for TraceVariablesAction {
    fn name(&self) -> &'static str {
        "trace-variables"
    }

    async fn execute(&self, context: &TestContext) -> ActionResult<()> {
        if self.names.is_empty() {
            for (name, value) in context.variables()? {
                info!(variable = %name, %value, "variable");
            }
            return Ok(());
        }
        for name in &self.names {
            let value = context.get_variable(name)?;
            info!(variable = %name, %value, "variable");
        }
        Ok(())
    }
}
