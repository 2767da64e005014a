//! Validation domain types.

mod columns;
mod contexts;

pub use columns::{ColumnValues, NULL_VALUE};
pub use contexts::{
    HeaderValidationContext, JsonPathValidationContext, JsonValidationContext,
    ScriptValidationContext, TextValidationContext, ValidationContext, XmlValidationContext,
};
