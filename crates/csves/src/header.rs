//! Case-insensitive header lookup.

use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

use crate::error::{CsvesError, Result};
use crate::schema::Schema;
use crate::text::normalize_text;

/// Lower-cased header name to zero-based column position.
///
/// Keys keep header order. When two cells normalize to the same key the later
/// position replaces the earlier one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct HeaderIndex {
    positions: IndexMap<String, usize>,
}

impl HeaderIndex {
    /// Build the index from a header row. Blank cells are not indexed.
    pub fn build(header: &[String]) -> Self {
        let mut positions = IndexMap::new();
        for (position, cell) in header.iter().enumerate() {
            let key = normalize_text(cell).to_lowercase();
            if key.is_empty() {
                continue;
            }
            positions.insert(key, position);
        }

        let index = Self { positions };
        debug!(mapping = ?index.positions, "CSV header mapping");
        index
    }

    /// Build the index and check it against the schema's required fields.
    pub fn build_for(header: &[String], schema: &Schema) -> Result<Self> {
        let index = Self::build(header);
        index.validate_required(schema)?;
        Ok(index)
    }

    /// Fail on the first required field whose source column is absent.
    pub fn validate_required(&self, schema: &Schema) -> Result<()> {
        for field in schema.required_fields() {
            if !self.positions.contains_key(&field.lookup_key()) {
                return Err(CsvesError::MissingRequiredField {
                    field: field.name.clone(),
                    column: field.source_column.clone(),
                });
            }
        }
        Ok(())
    }

    /// Column position for a header name, ignoring case and padding.
    pub fn position(&self, column: &str) -> Option<usize> {
        self.positions
            .get(&normalize_text(column).to_lowercase())
            .copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.positions.iter().map(|(k, &v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
