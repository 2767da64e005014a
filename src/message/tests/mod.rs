//! Unit tests for the message module.

mod payload_tests;
