//! Integration tests running complete tests over in-memory endpoints.
//!
//! Tests are organized into modules by functionality:
//! - `endpoint_tests`: endpoint sharing between contexts of a factory
//! - `execution_tests`: sequences, parallel groups, waits and retries
//! - `query_tests`: result-set validation through referenced executors

mod in_memory {
    pub mod helpers;

    mod endpoint_tests;
    mod execution_tests;
    mod query_tests;
}
