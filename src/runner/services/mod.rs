//! Test and suite execution.

mod runner;
mod suite;

pub use runner::TestCaseRunner;
pub use suite::TestSuite;
