//! Shared fixtures for in-memory integration tests.

use std::io;

use caliper::context::TestContextFactory;
use caliper::runner::domain::TestResult;
use rstest::fixture;
use tokio::runtime::Runtime;

/// Error type returned by integration tests.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Provides a tokio runtime for async operations in tests.
///
/// # Errors
///
/// Returns an error if the runtime cannot be created.
#[fixture]
pub fn runtime() -> io::Result<Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
}

/// Provides a factory with default settings.
#[fixture]
pub fn factory() -> TestContextFactory {
    TestContextFactory::default()
}

/// Fails with the test's cause unless it succeeded.
///
/// # Errors
///
/// Returns the rendered cause of a failed or skipped test.
pub fn ensure_success(result: &TestResult) -> Result<(), String> {
    if result.is_success() {
        return Ok(());
    }
    Err(result
        .cause()
        .map_or_else(|| format!("test '{}' was skipped", result.name()), ToString::to_string))
}
