//! Result-set validation and extraction.

use std::collections::BTreeMap;

use tracing::debug;

use crate::context::TestContext;
use crate::validation::domain::{ColumnValues, NULL_VALUE};
use crate::validation::error::{ValidationError, ValidationResult};
use crate::validation::rules::validate_value;

/// Control values by column name.
pub type ControlColumns = BTreeMap<String, Vec<String>>;

/// Looks a column up by its lower-case, upper-case, then exact name.
#[must_use]
pub fn find_column<'a>(columns: &'a ColumnValues, name: &str) -> Option<&'a Vec<Option<String>>> {
    columns
        .get(&name.to_lowercase())
        .or_else(|| columns.get(&name.to_uppercase()))
        .or_else(|| columns.get(name))
}

/// Validates `actual` against `control`, column by column.
///
/// Row counts are compared before values; values follow the shared
/// value rules, so `@ignore@`, matchers and `NULL` work as for headers.
///
/// # Errors
///
/// Returns the first [`ValidationError::ColumnNotFound`],
/// [`ValidationError::RowCountMismatch`] or value mismatch found.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
///
/// use caliper::context::TestContext;
/// use caliper::validation::services::validate_columns;
///
/// let context = TestContext::new();
/// let actual = BTreeMap::from([(
///     "foo".to_owned(),
///     vec![Some("bar".to_owned()), Some("baz".to_owned())],
/// )]);
/// let control = BTreeMap::from([("foo".to_owned(), vec!["bar".to_owned(), "baz".to_owned()])]);
/// assert!(validate_columns(&actual, &control, &context).is_ok());
/// ```
pub fn validate_columns(
    actual: &ColumnValues,
    control: &ControlColumns,
    context: &TestContext,
) -> ValidationResult<()> {
    for (column, expected_values) in control {
        let values = find_column(actual, column)
            .ok_or_else(|| ValidationError::ColumnNotFound(column.clone()))?;
        if values.len() != expected_values.len() {
            return Err(ValidationError::RowCountMismatch {
                column: column.clone(),
                expected: expected_values.len(),
                actual: values.len(),
            });
        }
        for (value, expected) in values.iter().zip(expected_values) {
            validate_value(column, value.as_deref(), expected, context)?;
        }
        debug!(column, rows = values.len(), "validated result column");
    }
    Ok(())
}

/// Stores column values in variables (column name to variable name).
///
/// Single-row columns store the value itself; multi-row columns store
/// the values joined by `;`. NULL is stored as `NULL`.
///
/// # Errors
///
/// Returns [`ValidationError::ColumnNotFound`] for unknown columns.
pub fn extract_columns(
    actual: &ColumnValues,
    extract: &BTreeMap<String, String>,
    context: &TestContext,
) -> ValidationResult<()> {
    for (column, variable) in extract {
        let values = find_column(actual, column)
            .ok_or_else(|| ValidationError::ColumnNotFound(column.clone()))?;
        let text = values
            .iter()
            .map(|value| value.as_deref().unwrap_or(NULL_VALUE))
            .collect::<Vec<_>>()
            .join(";");
        context.set_variable(variable, text)?;
    }
    Ok(())
}
