//! Test actors: named participants that can be switched off as a whole.
//!
//! When the actor bound to an endpoint is disabled, send and receive
//! actions on that endpoint are skipped. This lets a suite run against
//! a real peer instead of a simulated one without editing tests.

use std::sync::{PoisonError, RwLock};

use serde::{Deserialize, Serialize};

/// A named participant in a test scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestActor {
    name: String,
    disabled: bool,
}

impl TestActor {
    /// Creates an enabled actor.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            disabled: false,
        }
    }

    /// Returns this actor with the disabled flag set as given.
    #[must_use]
    pub const fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Returns the actor name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` if actions of this actor must be skipped.
    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        self.disabled
    }
}

/// Interior-mutable actor binding for endpoint implementations.
#[derive(Debug, Default)]
pub struct ActorSlot(RwLock<Option<TestActor>>);

impl ActorSlot {
    /// Returns the bound actor.
    #[must_use]
    pub fn get(&self) -> Option<TestActor> {
        self.0.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Replaces the bound actor.
    pub fn set(&self, actor: Option<TestActor>) {
        *self.0.write().unwrap_or_else(PoisonError::into_inner) = actor;
    }
}
