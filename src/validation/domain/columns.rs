//! Tabular result data.

use std::collections::BTreeMap;

/// Column name to the column's values, one entry per row. `None` is SQL NULL.
pub type ColumnValues = BTreeMap<String, Vec<Option<String>>>;

/// Textual form of a NULL value.
pub const NULL_VALUE: &str = "NULL";
