//! Query execution port.

use std::fmt;

use async_trait::async_trait;

use crate::action::error::ActionResult;
use crate::validation::domain::ColumnValues;

/// Rows returned by a query, as values by column.
pub type QueryResult = ColumnValues;

/// Runs read-only statements against a data source.
#[async_trait]
pub trait QueryExecutor: Send + Sync + fmt::Debug {
    /// Runs `statement` and returns its rows.
    ///
    /// # Errors
    ///
    /// Returns an execution error when the statement cannot run.
    async fn query(&self, statement: &str) -> ActionResult<QueryResult>;
}
