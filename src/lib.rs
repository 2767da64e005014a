//! Caliper: test action execution and message validation for integration
//! tests.
//!
//! A test is a tree of actions run against a per-test context. Actions
//! send and receive messages through endpoints, validate what arrives,
//! query databases, wait for conditions and compose into sequences,
//! loops, parallel groups and forked work.
//!
//! # Architecture
//!
//! Caliper follows hexagonal architecture principles:
//!
//! - **Domain**: messages, validation contexts, test cases and results
//! - **Ports**: trait seams for actions, endpoints, validators, message
//!   stores, query executors and listeners
//! - **Adapters**: in-memory direct endpoints, JSON/XML/text validators,
//!   a static query executor and logging listeners
//!
//! # Modules
//!
//! - [`context`]: variables, functions, matchers and per-test bookkeeping
//! - [`message`]: message envelope and named message storage
//! - [`endpoint`]: endpoint URIs, producers and consumers
//! - [`validation`]: message and result-set validation
//! - [`action`]: atomic actions, containers and the builder DSL
//! - [`runner`]: test cases, suites, hooks and listeners
//! - [`settings`]: layered framework settings
//! - [`telemetry`]: tracing subscriber setup

pub mod action;
pub mod context;
pub mod endpoint;
pub mod message;
pub mod runner;
pub mod settings;
pub mod telemetry;
pub mod validation;
