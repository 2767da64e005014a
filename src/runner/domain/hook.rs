//! Before and after hooks with test filters.

use std::collections::BTreeSet;

use super::TestCase;
use crate::action::container::ActionList;
use crate::action::ports::TestActionBuilder;

/// Actions run around tests or suites.
///
/// A hook applies when every configured filter matches: the name and
/// package patterns (`*` matches any run of characters) and, when groups
/// are configured, at least one shared group.
#[derive(Debug, Clone, Default)]
pub struct Hook {
    name_pattern: Option<String>,
    package_pattern: Option<String>,
    groups: BTreeSet<String>,
    actions: ActionList,
}

impl Hook {
    /// Creates a hook that applies everywhere.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the hook to matching test (or suite) names.
    #[must_use]
    pub fn with_name_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.name_pattern = Some(pattern.into());
        self
    }

    /// Restricts the hook to matching packages.
    #[must_use]
    pub fn with_package_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.package_pattern = Some(pattern.into());
        self
    }

    /// Restricts the hook to tests in `group`.
    #[must_use]
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.groups.insert(group.into());
        self
    }

    /// Adds an action.
    #[must_use]
    pub fn with_action(mut self, action: impl TestActionBuilder + 'static) -> Self {
        self.actions.push(action);
        self
    }

    /// The hook's actions.
    #[must_use]
    pub const fn actions(&self) -> &ActionList {
        &self.actions
    }

    /// Returns `true` if the hook applies to `test`.
    #[must_use]
    pub fn applies_to(&self, test: &TestCase) -> bool {
        self.applies(test.name(), test.package(), test.groups())
    }

    /// Returns `true` if the hook applies to a suite named `name` whose
    /// tests belong to `groups`.
    #[must_use]
    pub fn applies_to_suite(&self, name: &str, groups: &BTreeSet<String>) -> bool {
        self.package_pattern.is_none() && self.applies(name, "", groups)
    }

    fn applies(&self, name: &str, package: &str, groups: &BTreeSet<String>) -> bool {
        self.name_pattern
            .as_deref()
            .is_none_or(|pattern| matches_pattern(pattern, name))
            && self
                .package_pattern
                .as_deref()
                .is_none_or(|pattern| matches_pattern(pattern, package))
            && (self.groups.is_empty() || !self.groups.is_disjoint(groups))
    }
}

/// Matches `text` against `pattern`, where `*` stands for any run of
/// characters.
#[must_use]
pub fn matches_pattern(pattern: &str, text: &str) -> bool {
    let mut parts = pattern.split('*');
    let Some(first) = parts.next() else {
        return text.is_empty();
    };
    let Some(mut rest) = text.strip_prefix(first) else {
        return false;
    };

    let remaining = parts.collect::<Vec<_>>();
    let Some((last, middle)) = remaining.split_last() else {
        return rest.is_empty();
    };
    for part in middle {
        match rest.find(part) {
            Some(position) => {
                let (_, tail) = rest.split_at(position + part.len());
                rest = tail;
            }
            None => return false,
        }
    }
    rest.ends_with(last)
}
