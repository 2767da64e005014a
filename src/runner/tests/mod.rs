//! Unit tests for the runner module.

mod hook_tests;
