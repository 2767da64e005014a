//! Unit tests for the action module.

mod failure_tests;
mod message_tests;
mod support;
