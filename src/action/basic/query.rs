//! Read-only queries with result-set validation.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::action::error::{ActionError, ActionResult, FailureKind};
use crate::action::ports::{QueryExecutor, QueryResult, TestAction};
use crate::context::TestContext;
use crate::validation::domain::ScriptValidationContext;
use crate::validation::error::ValidationResult;
use crate::validation::ports::ScriptSubject;
use crate::validation::services::{ControlColumns, extract_columns, resolve_script_validator, validate_columns};

const DEFAULT_RETRY_PAUSE: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone)]
enum DataSource {
    Executor(Arc<dyn QueryExecutor>),
    Reference(String),
}

/// Runs `SELECT`/`WITH` statements, validates the combined result and
/// stores columns in variables.
///
/// Rows of all statements are merged by column. Validation runs the
/// control columns first and the script second; variables are extracted
/// only from a result that validated. Failed attempts are retried up to
/// `max_retries` times with `retry_pause` in between.
#[derive(Debug, Clone)]
pub struct QueryAction {
    data_source: DataSource,
    statements: Vec<String>,
    control: ControlColumns,
    extract: BTreeMap<String, String>,
    script: Option<ScriptValidationContext>,
    max_retries: u32,
    retry_pause: Duration,
}

impl QueryAction {
    /// Queries through `executor`.
    #[must_use]
    pub fn new(executor: Arc<dyn QueryExecutor>) -> Self {
        Self::with_data_source(DataSource::Executor(executor))
    }

    /// Queries through the executor bound under `reference` at execution
    /// time.
    #[must_use]
    pub fn referenced(reference: impl Into<String>) -> Self {
        Self::with_data_source(DataSource::Reference(reference.into()))
    }

    fn with_data_source(data_source: DataSource) -> Self {
        Self {
            data_source,
            statements: Vec::new(),
            control: ControlColumns::new(),
            extract: BTreeMap::new(),
            script: None,
            max_retries: 0,
            retry_pause: DEFAULT_RETRY_PAUSE,
        }
    }

    /// Adds a statement.
    #[must_use]
    pub fn with_statement(mut self, statement: impl Into<String>) -> Self {
        self.statements.push(statement.into());
        self
    }

    /// Adds the `;`-separated statements of `script`, skipping lines
    /// that start with `--`.
    #[must_use]
    pub fn with_script(mut self, script: &str) -> Self {
        self.statements.extend(split_statements(script));
        self
    }

    /// Expects `values` in `column`, one per row.
    #[must_use]
    pub fn with_column<I, S>(mut self, column: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.control
            .insert(column.into(), values.into_iter().map(Into::into).collect());
        self
    }

    /// Stores `column` in `variable`.
    #[must_use]
    pub fn extract(mut self, column: impl Into<String>, variable: impl Into<String>) -> Self {
        self.extract.insert(column.into(), variable.into());
        self
    }

    /// Validates the result with a script.
    #[must_use]
    pub fn with_validation_script(mut self, script: ScriptValidationContext) -> Self {
        self.script = Some(script);
        self
    }

    /// Retries failed attempts.
    #[must_use]
    pub const fn with_retries(mut self, max_retries: u32, retry_pause: Duration) -> Self {
        self.max_retries = max_retries;
        self.retry_pause = retry_pause;
        self
    }

    fn executor(&self, context: &TestContext) -> ActionResult<Arc<dyn QueryExecutor>> {
        match &self.data_source {
            DataSource::Executor(executor) => Ok(Arc::clone(executor)),
            DataSource::Reference(name) => Ok(context.references().require::<Arc<dyn QueryExecutor>>(name)?),
        }
    }

    async fn query(&self, executor: &dyn QueryExecutor, context: &TestContext) -> ActionResult<QueryResult> {
        let mut merged = QueryResult::new();
        for statement in &self.statements {
            check_statement(statement)?;
            let resolved = context.replace_dynamic_content(statement.trim().trim_end_matches(';'))?;
            debug!(statement = %resolved, "executing query");
            let result = executor.query(&resolved).await?;
            if result.values().all(Vec::is_empty) {
                return Err(ActionError::execution(
                    self.name(),
                    format!("empty result set for statement '{resolved}'"),
                ));
            }
            for (column, values) in result {
                merged.entry(column).or_default().extend(values);
            }
        }
        Ok(merged)
    }

    fn validate(&self, result: &QueryResult, context: &TestContext) -> ValidationResult<()> {
        validate_columns(result, &self.control, context)?;
        if let Some(script) = &self.script {
            let validator = resolve_script_validator(script.validator.as_deref(), &script.script_type, context)?;
            let resolved = context.replace_dynamic_content(&script.script)?;
            validator.validate(ScriptSubject::Columns(result), &resolved, context)?;
        }
        Ok(())
    }

    async fn attempt(&self, executor: &dyn QueryExecutor, context: &TestContext) -> ActionResult<QueryResult> {
        let result = self.query(executor, context).await?;
        self.validate(&result, context)?;
        Ok(result)
    }
}

fn split_statements(script: &str) -> Vec<String> {
    let mut statements = Vec::new();
    let mut current = String::new();
    for line in script.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with("--") {
            continue;
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(trimmed);
        if trimmed.ends_with(';') {
            statements.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        statements.push(current);
    }
    statements
}

fn check_statement(statement: &str) -> ActionResult<()> {
    let keyword = statement
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_uppercase();
    if keyword == "SELECT" || keyword == "WITH" {
        Ok(())
    } else {
        Err(ActionError::configuration(format!(
            "missing keyword SELECT or WITH in statement '{statement}'"
        )))
    }
}

#[async_trait]
impl TestAction for QueryAction {
    fn name(&self) -> &'static str {
        "sql-query"
    }

    async fn execute(&self, context: &TestContext) -> ActionResult<()> {
        if self.statements.is_empty() {
            return Err(ActionError::configuration("query action without statements"));
        }
        let executor = self.executor(context)?;

        let mut retries = 0;
        let result = loop {
            match self.attempt(executor.as_ref(), context).await {
                Ok(result) => break result,
                Err(err) if err.kind() != FailureKind::Configuration && retries < self.max_retries => {
                    retries += 1;
                    warn!(error = %err, retry = retries, "query validation failed, retrying");
                    tokio::time::sleep(self.retry_pause).await;
                }
                Err(err) => return Err(err),
            }
        };

        extract_columns(&result, &self.extract, context)?;
        info!(statements = self.statements.len(), "query result validated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{check_statement, split_statements};

    #[test]
    fn script_splitting_skips_comment_lines() {
        let script = "-- lookup\nSELECT name\n  FROM users;\n-- done\nWITH x AS (SELECT 1) SELECT * FROM x";
        assert_eq!(
            split_statements(script),
            vec![
                "SELECT name FROM users;".to_owned(),
                "WITH x AS (SELECT 1) SELECT * FROM x".to_owned(),
            ]
        );
    }

    #[rstest]
    #[case("select * from t", true)]
    #[case("  WITH a AS (SELECT 1) SELECT * FROM a", true)]
    #[case("DELETE FROM t", false)]
    #[case("", false)]
    fn only_read_statements_are_accepted(#[case] statement: &str, #[case] accepted: bool) {
        assert_eq!(check_statement(statement).is_ok(), accepted);
    }
}
