//! Canned query results for tests and demos.

use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::action::error::{ActionError, ActionResult};
use crate::action::ports::{QueryExecutor, QueryResult};

/// Answers statements from a fixed table, normalised by whitespace and
/// case. A statement may have a queue of results; each call consumes the
/// next one and the last result repeats.
///
/// Clones share state, so a test can keep a handle and inspect the
/// executed statements afterwards.
#[derive(Debug, Clone, Default)]
pub struct StaticQueryExecutor {
    results: Arc<Mutex<BTreeMap<String, VecDeque<QueryResult>>>>,
    executed: Arc<Mutex<Vec<String>>>,
}

impl StaticQueryExecutor {
    /// Creates an executor without results.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a result for `statement`.
    #[must_use]
    pub fn with_result(self, statement: &str, result: QueryResult) -> Self {
        if let Ok(mut results) = self.results.lock() {
            results
                .entry(normalize(statement))
                .or_default()
                .push_back(result);
        }
        self
    }

    /// Statements executed so far, in order.
    #[must_use]
    pub fn executed(&self) -> Vec<String> {
        self.executed
            .lock()
            .map(|executed| executed.clone())
            .unwrap_or_default()
    }
}

fn normalize(statement: &str) -> String {
    statement
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[async_trait]
impl QueryExecutor for StaticQueryExecutor {
    async fn query(&self, statement: &str) -> ActionResult<QueryResult> {
        let poisoned = |err: String| ActionError::execution("query", err);
        self.executed
            .lock()
            .map_err(|err| poisoned(err.to_string()))?
            .push(statement.to_owned());

        let mut results = self.results.lock().map_err(|err| poisoned(err.to_string()))?;
        let queue = results
            .get_mut(&normalize(statement))
            .ok_or_else(|| ActionError::execution("query", format!("no result for '{statement}'")))?;
        let result = if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        };
        result.ok_or_else(|| ActionError::execution("query", format!("no result for '{statement}'")))
    }
}
