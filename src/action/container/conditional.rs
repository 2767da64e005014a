//! Conditional execution.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::ActionList;
use crate::action::domain::ContextPredicate;
use crate::action::error::ActionResult;
use crate::action::ports::{TestAction, TestActionBuilder};
use crate::context::{BooleanExpressionParser, TestContext};

#[derive(Clone)]
enum Condition {
    Expression(String),
    Predicate(ContextPredicate),
}

impl fmt::Debug for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expression(expression) => f.debug_tuple("Expression").field(expression).finish(),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

/// Runs its actions only when a condition holds.
#[derive(Debug, Clone)]
pub struct Conditional {
    condition: Condition,
    actions: ActionList,
}

impl Conditional {
    /// Runs when the boolean `expression` holds after dynamic content
    /// is resolved, for example `${count} gt 2`.
    #[must_use]
    pub fn when(expression: impl Into<String>) -> Self {
        Self {
            condition: Condition::Expression(expression.into()),
            actions: ActionList::new(),
        }
    }

    /// Runs when `predicate` returns `true`.
    #[must_use]
    pub fn when_fn<F>(predicate: F) -> Self
    where
        F: Fn(&TestContext) -> bool + Send + Sync + 'static,
    {
        Self {
            condition: Condition::Predicate(Arc::new(predicate)),
            actions: ActionList::new(),
        }
    }

    /// Adds an action.
    #[must_use]
    pub fn with_action(mut self, action: impl TestActionBuilder + 'static) -> Self {
        self.actions.push(action);
        self
    }

    fn holds(&self, context: &TestContext) -> ActionResult<bool> {
        match &self.condition {
            Condition::Expression(expression) => {
                let resolved = context.replace_dynamic_content(expression)?;
                Ok(BooleanExpressionParser::evaluate(&resolved)?)
            }
            Condition::Predicate(predicate) => Ok(predicate(context)),
        }
    }
}

#[async_trait]
impl TestAction for Conditional {
    fn name(&self) -> &'static str {
        "conditional"
    }

    async fn execute(&self, context: &TestContext) -> ActionResult<()> {
        if self.holds(context)? {
            self.actions.run(context).await
        } else {
            debug!(condition = ?self.condition, "condition not met, skipping actions");
            Ok(())
        }
    }
}
