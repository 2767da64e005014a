//! Action port implementations.

mod static_query;

pub use static_query::StaticQueryExecutor;
