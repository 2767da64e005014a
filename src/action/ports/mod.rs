//! Action ports.

mod action;
mod query;

pub use action::{TestAction, TestActionBuilder};
pub use query::{QueryExecutor, QueryResult};
