//! Unit tests for the context module.

mod function_tests;
mod matcher_tests;
mod reference_tests;
mod variable_tests;
