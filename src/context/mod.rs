//! Per-test state: variables, dynamic content and lookup registries.
//!
//! A [`TestContext`] is created for every test execution by a
//! [`TestContextFactory`]. It stores variables referenced as `${name}`
//! placeholders, evaluates function calls such as
//! `citrus:concat('a', 'b')`, resolves validation matchers and named
//! references, and keeps the bookkeeping for forked actions and timers.
//!
//! Dynamic content is resolved lazily, when an action executes, never when
//! the action is declared.

pub mod error;
mod expression;
mod factory;
pub mod functions;
pub mod matchers;
mod reference;
mod test_context;
mod timers;
pub mod variables;

pub use expression::BooleanExpressionParser;
pub use factory::TestContextFactory;
pub use reference::ReferenceResolver;
pub use test_context::TestContext;
pub use timers::StopSignal;

#[cfg(test)]
mod tests;
