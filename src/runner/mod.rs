//! Test case execution, results, hooks and listeners.
//!
//! A [`domain::TestCase`] is run by a [`services::TestCaseRunner`]: a
//! fresh context is created, variables and endpoints are prepared, the
//! actions run in order, and the finish phase joins forked work, stops
//! timers and always runs the final actions. Every test ends in exactly
//! one [`domain::TestOutcome`] carrying at most one root cause.
//!
//! A [`services::TestSuite`] runs several tests between before-suite and
//! after-suite hooks and summarises their results.
//!
//! # Example
//!
//! ```
//! use caliper::action::dsl::{create_variables, echo};
//! use caliper::runner::domain::TestCase;
//! use caliper::runner::services::TestCaseRunner;
//!
//! let runtime = tokio::runtime::Builder::new_current_thread()
//!     .enable_all()
//!     .build()
//!     .expect("runtime");
//! let test = TestCase::new("greeting")
//!     .with_variable("user", "Ada")
//!     .with_action(create_variables().with_variable("greeting", "Hello ${user}"))
//!     .with_action(echo("${greeting}"));
//!
//! let result = runtime.block_on(TestCaseRunner::default().run(&test));
//! assert!(result.is_success());
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
