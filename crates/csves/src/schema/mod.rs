//! Field schema: what the documents look like and which header feeds each field.

mod field;
mod resolver;

pub use field::{FieldDefinition, Schema, parse_selection};
pub use resolver::resolve_schema;
