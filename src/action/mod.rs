//! Test actions and containers.
//!
//! A test is a tree of [`ports::TestAction`]s. Atomic actions in
//! [`basic`] exchange messages with endpoints, manage variables and run
//! queries; containers in [`container`] sequence, parallelise, fork,
//! loop, time and guard their children. All mutable state lives in the
//! [`crate::context::TestContext`] passed to `execute`.
//!
//! # Architecture
//!
//! - **Domain**: [`domain::MessageTemplate`], [`domain::LoopCondition`],
//!   [`domain::WaitCondition`]
//! - **Ports**: [`ports::TestAction`], [`ports::TestActionBuilder`],
//!   [`ports::QueryExecutor`]
//! - **Adapters**: [`adapters::StaticQueryExecutor`]
//! - **DSL**: [`dsl`] free functions

pub mod adapters;
pub mod basic;
pub mod container;
pub mod domain;
pub mod dsl;
pub mod error;
pub mod ports;

#[cfg(test)]
mod tests;
