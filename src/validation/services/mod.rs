//! Validation services: validator lookup, result-set checks and script
//! validator resolution.

mod columns;
mod registry;
mod scripts;

pub use columns::{ControlColumns, extract_columns, find_column, validate_columns};
pub use registry::MessageValidatorRegistry;
pub use scripts::{DEFAULT_SCRIPT_VALIDATOR, resolve_script_validator};
