//! Choose the schema used for a run.

use tracing::info;

use super::field::Schema;

/// Resolve the schema for a file from its cleaned header.
///
/// A non-empty external schema wins, narrowed by `selection`. Otherwise one
/// field is inferred per non-empty header cell. Never fails: an empty schema
/// is a legal result, and missing required columns are caught by the header
/// index.
pub fn resolve_schema(header: &[String], external: Option<&Schema>, selection: &[String]) -> Schema {
    match external {
        Some(schema) if !schema.is_empty() => {
            let resolved = schema.narrowed(selection);
            info!(
                fields = ?resolved.field_names(),
                "Using configured field schema"
            );
            resolved
        }
        _ => {
            let inferred = Schema::infer_from_header(header);
            info!(fields = ?inferred.field_names(), "Detected fields from header");
            inferred
        }
    }
}
