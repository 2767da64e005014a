//! Unit tests for the validation module.

mod header_tests;
mod json_tests;
mod registry_tests;
mod rules_tests;
mod text_tests;
mod xml_tests;
