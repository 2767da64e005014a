//! Failure handling containers.

use async_trait::async_trait;
use tracing::info;

use super::{ActionList, run_action};
use crate::action::error::{ActionError, ActionResult, FailureKind};
use crate::action::ports::{TestAction, TestActionBuilder};
use crate::context::TestContext;
use crate::context::matchers::is_matcher_expression;

/// Runs each action and swallows failures of the given kind, continuing
/// with the next action. Without a kind every failure is caught.
#[derive(Debug, Clone, Default)]
pub struct Catch {
    kind: Option<FailureKind>,
    actions: ActionList,
}

impl Catch {
    /// Catches every failure.
    #[must_use]
    pub const fn any() -> Self {
        Self {
            kind: None,
            actions: ActionList::new(),
        }
    }

    /// Catches failures of `kind` only.
    #[must_use]
    pub const fn kind(kind: FailureKind) -> Self {
        Self {
            kind: Some(kind),
            actions: ActionList::new(),
        }
    }

    /// Adds an action.
    #[must_use]
    pub fn with_action(mut self, action: impl TestActionBuilder + 'static) -> Self {
        self.actions.push(action);
        self
    }
}

#[async_trait]
impl TestAction for Catch {
    fn name(&self) -> &'static str {
        "catch"
    }

    async fn execute(&self, context: &TestContext) -> ActionResult<()> {
        for builder in self.actions.iter() {
            let action = builder.build();
            match run_action(action.as_ref(), context).await {
                Ok(()) => {}
                Err(err) if self.kind.is_none_or(|kind| kind == err.kind()) => {
                    info!(action = action.name(), error = %err, "caught failure");
                }
                Err(err) => return Err(err),
            }
        }
        Ok(())
    }
}

/// Expects its actions to fail with the given kind and, optionally, a
/// message. The message is a substring of the failure text, or a
/// matcher expression applied to it.
#[derive(Debug, Clone, Default)]
pub struct AssertFailure {
    kind: Option<FailureKind>,
    message: Option<String>,
    actions: ActionList,
}

impl AssertFailure {
    /// Expects any failure.
    #[must_use]
    pub const fn any() -> Self {
        Self {
            kind: None,
            message: None,
            actions: ActionList::new(),
        }
    }

    /// Expects a failure of `kind`.
    #[must_use]
    pub const fn kind(kind: FailureKind) -> Self {
        Self {
            kind: Some(kind),
            message: None,
            actions: ActionList::new(),
        }
    }

    /// Expects the failure text to contain or match `message`.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Adds an action.
    #[must_use]
    pub fn with_action(mut self, action: impl TestActionBuilder + 'static) -> Self {
        self.actions.push(action);
        self
    }

    fn expected(&self) -> String {
        let kind = self.kind.map_or_else(|| "any".to_owned(), |kind| kind.to_string());
        match &self.message {
            Some(message) => format!("{kind} ('{message}')"),
            None => kind,
        }
    }

    fn message_matches(&self, text: &str, context: &TestContext) -> ActionResult<bool> {
        let Some(message) = &self.message else {
            return Ok(true);
        };
        let expected = context.replace_dynamic_content(message)?;
        if is_matcher_expression(&expected) {
            return Ok(context
                .matcher_registry()
                .validate_expression("message", text, &expected, context)
                .is_ok());
        }
        Ok(text.contains(&expected))
    }
}

#[async_trait]
impl TestAction for AssertFailure {
    fn name(&self) -> &'static str {
        "assert"
    }

    async fn execute(&self, context: &TestContext) -> ActionResult<()> {
        let Err(err) = self.actions.run(context).await else {
            return Err(ActionError::AssertionNotRaised {
                expected: self.expected(),
            });
        };

        let kind_matches = self.kind.is_none_or(|kind| kind == err.kind());
        if kind_matches && self.message_matches(&err.to_string(), context)? {
            info!(error = %err, "asserted failure was raised");
            return Ok(());
        }
        Err(ActionError::UnexpectedFailure {
            expected: self.expected(),
            actual: Box::new(err),
        })
    }
}
