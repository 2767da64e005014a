//! Test case definition.

use std::collections::BTreeSet;

use crate::action::container::ActionList;
use crate::action::ports::TestActionBuilder;

/// A named, runnable test: variables, endpoints, actions and final
/// actions.
///
/// Variables are resolved in declaration order, so later ones may refer
/// to earlier ones. Final actions run after the actions whether or not
/// they succeeded.
#[derive(Debug, Clone)]
pub struct TestCase {
    name: String,
    package: String,
    description: Option<String>,
    enabled: bool,
    parameters: Vec<(String, String)>,
    variables: Vec<(String, String)>,
    endpoints: Vec<String>,
    actions: ActionList,
    final_actions: ActionList,
    groups: BTreeSet<String>,
}

impl TestCase {
    /// Creates an enabled test named `name` in the default package.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            package: String::new(),
            description: None,
            enabled: true,
            parameters: Vec::new(),
            variables: Vec::new(),
            endpoints: Vec::new(),
            actions: ActionList::new(),
            final_actions: ActionList::new(),
            groups: BTreeSet::new(),
        }
    }

    /// Sets the package.
    #[must_use]
    pub fn in_package(mut self, package: impl Into<String>) -> Self {
        self.package = package.into();
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Disables the test; running it yields a skipped result.
    #[must_use]
    pub const fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Adds a parameter, stored as a variable before any other variable.
    #[must_use]
    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.push((name.into(), value.into()));
        self
    }

    /// Adds a variable.
    #[must_use]
    pub fn with_variable(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.push((name.into(), value.into()));
        self
    }

    /// Resolves `uri` before the first action runs.
    #[must_use]
    pub fn with_endpoint(mut self, uri: impl Into<String>) -> Self {
        self.endpoints.push(uri.into());
        self
    }

    /// Appends an action.
    #[must_use]
    pub fn with_action(mut self, action: impl TestActionBuilder + 'static) -> Self {
        self.actions.push(action);
        self
    }

    /// Appends a final action.
    #[must_use]
    pub fn with_final_action(mut self, action: impl TestActionBuilder + 'static) -> Self {
        self.final_actions.push(action);
        self
    }

    /// Adds the test to `group`.
    #[must_use]
    pub fn in_group(mut self, group: impl Into<String>) -> Self {
        self.groups.insert(group.into());
        self
    }

    /// The test name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The package, empty for the default package.
    #[must_use]
    pub fn package(&self) -> &str {
        &self.package
    }

    /// The description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns `false` for disabled tests.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Parameters in declaration order.
    #[must_use]
    pub fn parameters(&self) -> &[(String, String)] {
        &self.parameters
    }

    /// Variables in declaration order.
    #[must_use]
    pub fn variables(&self) -> &[(String, String)] {
        &self.variables
    }

    /// Endpoints resolved up front.
    #[must_use]
    pub fn endpoints(&self) -> &[String] {
        &self.endpoints
    }

    /// The actions.
    #[must_use]
    pub const fn actions(&self) -> &ActionList {
        &self.actions
    }

    /// The final actions.
    #[must_use]
    pub const fn final_actions(&self) -> &ActionList {
        &self.final_actions
    }

    /// The groups.
    #[must_use]
    pub const fn groups(&self) -> &BTreeSet<String> {
        &self.groups
    }
}
