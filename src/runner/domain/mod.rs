//! Runner domain types.

mod hook;
mod result;
mod test_case;

pub use hook::{Hook, matches_pattern};
pub use result::{SuiteResult, TestOutcome, TestResult};
pub use test_case::TestCase;
