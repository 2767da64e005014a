//! Script validator resolution.

use std::sync::Arc;

use tracing::warn;

use crate::context::TestContext;
use crate::validation::error::{ValidationError, ValidationResult};
use crate::validation::ports::ScriptValidator;

/// Reference name of the script validator used when none is named.
pub const DEFAULT_SCRIPT_VALIDATOR: &str = "defaultScriptValidator";

/// Chooses the script validator for a script of `script_type`.
///
/// In order:
/// 1. the validator bound under `explicit`, when given;
/// 2. the validator bound under [`DEFAULT_SCRIPT_VALIDATOR`];
/// 3. the single bound validator supporting the type;
/// 4. the single registry validator supporting the type.
///
/// # Errors
///
/// Returns [`ValidationError::NoScriptValidator`] when the named
/// validator is missing, no candidate exists, or several candidates
/// exist at the deciding step.
pub fn resolve_script_validator(
    explicit: Option<&str>,
    script_type: &str,
    context: &TestContext,
) -> ValidationResult<Arc<dyn ScriptValidator>> {
    let references = context.references();
    if let Some(name) = explicit {
        return references
            .resolve::<Arc<dyn ScriptValidator>>(name)?
            .ok_or_else(|| ValidationError::NoScriptValidator(format!("no validator bound as '{name}'")));
    }
    if let Some(default) = references.resolve::<Arc<dyn ScriptValidator>>(DEFAULT_SCRIPT_VALIDATOR)? {
        return Ok(default);
    }

    let bound = references
        .resolve_all::<Arc<dyn ScriptValidator>>()?
        .into_iter()
        .map(|(_, validator)| validator)
        .filter(|validator| validator.supports(script_type))
        .collect::<Vec<_>>();
    if !bound.is_empty() {
        return single(bound, script_type, "context");
    }

    let registered = context
        .validator_registry()
        .script_validators()
        .iter()
        .filter(|validator| validator.supports(script_type))
        .cloned()
        .collect::<Vec<_>>();
    single(registered, script_type, "default")
}

fn single(
    mut candidates: Vec<Arc<dyn ScriptValidator>>,
    script_type: &str,
    source: &str,
) -> ValidationResult<Arc<dyn ScriptValidator>> {
    if candidates.len() > 1 {
        warn!(
            script_type,
            source,
            candidates = candidates.len(),
            "found multiple script validators, refusing to choose one"
        );
        return Err(ValidationError::NoScriptValidator(format!(
            "{} {source} validators support script type '{script_type}'",
            candidates.len()
        )));
    }
    candidates.pop().ok_or_else(|| {
        ValidationError::NoScriptValidator(format!("no validator supports script type '{script_type}'"))
    })
}
