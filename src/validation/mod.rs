//! Message and result-set validation.
//!
//! A receive action compares the received message with a control
//! message. The [`services::MessageValidatorRegistry`] picks validators
//! by declared message type, each validator reads the
//! [`domain::ValidationContext`]s it understands, and every single value
//! goes through [`rules::validate_value`], which handles the ignore
//! placeholder, matcher expressions and NULL.
//!
//! Query results are checked by [`services::validate_columns`] with the
//! same value rules.

pub mod adapters;
pub mod domain;
pub mod error;
pub mod ports;
pub mod rules;
pub mod services;

#[cfg(test)]
mod tests;
