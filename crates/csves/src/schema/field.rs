//! Field definitions and the ordered schema built from them.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CsvesError, Result};
use crate::text::normalize_text;

/// One output field and the header column that supplies it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Field name in the output document.
    pub name: String,
    /// Header text of the source column (matched case-insensitively).
    #[serde(rename = "csv_name")]
    pub source_column: String,
    /// Whether the header must contain the source column.
    #[serde(default)]
    pub required: bool,
}

impl FieldDefinition {
    /// Create an optional field.
    pub fn new(name: impl Into<String>, source_column: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source_column: source_column.into(),
            required: false,
        }
    }

    /// Mark the field as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Header lookup key for the source column.
    pub fn lookup_key(&self) -> String {
        normalize_text(&self.source_column).to_lowercase()
    }
}

/// Ordered list of field definitions.
///
/// Serializes as a plain JSON array, the same shape as the field-config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema {
    fields: Vec<FieldDefinition>,
}

impl Schema {
    /// Create a schema from definitions, keeping their order.
    pub fn new(fields: Vec<FieldDefinition>) -> Self {
        Self { fields }
    }

    /// Infer one optional field per non-empty header cell.
    ///
    /// Duplicate header names produce duplicate definitions.
    pub fn infer_from_header(header: &[String]) -> Self {
        let fields = header
            .iter()
            .map(|h| normalize_text(h))
            .filter(|name| !name.is_empty())
            .map(|name| FieldDefinition::new(name.clone(), name))
            .collect();
        Self { fields }
    }

    /// Load a schema from a JSON field-config file.
    ///
    /// The file holds an array of `{"name", "csv_name", "required"}` objects.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let contents = fs::read_to_string(path).map_err(|e| {
            CsvesError::SchemaLoad(format!(
                "Failed to read field config '{}': {}",
                path.display(),
                e
            ))
        })?;

        let schema = Self::from_json(&contents).map_err(|e| match e {
            CsvesError::SchemaLoad(msg) => {
                CsvesError::SchemaLoad(format!("{} ({})", msg, path.display()))
            }
            other => other,
        })?;

        if schema.is_empty() {
            return Err(CsvesError::SchemaLoad(format!(
                "Field config '{}' defines no fields",
                path.display()
            )));
        }

        Ok(schema)
    }

    /// Parse and validate a schema from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        let schema: Schema = serde_json::from_str(json)
            .map_err(|e| CsvesError::SchemaLoad(format!("Failed to parse field config: {}", e)))?;
        schema.validate()?;
        Ok(schema)
    }

    /// Reject definitions with a blank name or source column.
    pub fn validate(&self) -> Result<()> {
        for (position, field) in self.fields.iter().enumerate() {
            if normalize_text(&field.name).is_empty() {
                return Err(CsvesError::SchemaLoad(format!(
                    "Field #{} has an empty name",
                    position + 1
                )));
            }
            if normalize_text(&field.source_column).is_empty() {
                return Err(CsvesError::SchemaLoad(format!(
                    "Field '{}' has an empty csv_name",
                    field.name
                )));
            }
        }
        Ok(())
    }

    /// Keep only fields whose name matches an entry of `selection`, ignoring case.
    ///
    /// An empty selection keeps every field.
    pub fn narrowed(&self, selection: &[String]) -> Self {
        if selection.is_empty() {
            return self.clone();
        }

        let fields = self
            .fields
            .iter()
            .filter(|field| {
                selection.iter().any(|selected| {
                    field.name.to_lowercase() == selected.trim().to_lowercase()
                })
            })
            .cloned()
            .collect();
        Self { fields }
    }

    /// Field definitions in order.
    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldDefinition> {
        self.fields.iter()
    }

    /// Output field names in order.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Definitions marked as required.
    pub fn required_fields(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.fields.iter().filter(|f| f.required)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<'a> IntoIterator for &'a Schema {
    type Item = &'a FieldDefinition;
    type IntoIter = std::slice::Iter<'a, FieldDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl FromIterator<FieldDefinition> for Schema {
    fn from_iter<I: IntoIterator<Item = FieldDefinition>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Split a comma-separated field selection, trimming entries and dropping blanks.
pub fn parse_selection(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn header(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_infer_from_header_drops_empty_cells() {
        let schema = Schema::infer_from_header(&header(&["Name", " Email ", "", "Email"]));
        assert_eq!(schema.field_names(), vec!["Name", "Email", "Email"]);
        assert!(schema.iter().all(|f| !f.required));
        assert!(schema.iter().all(|f| f.name == f.source_column));
    }

    #[test]
    fn test_from_json() {
        let json = r#"[
            {"name": "id", "csv_name": "ID", "required": true},
            {"name": "full_name", "csv_name": "Name"}
        ]"#;
        let schema = Schema::from_json(json).unwrap();
        assert_eq!(schema.len(), 2);
        assert_eq!(schema.fields()[0], FieldDefinition::new("id", "ID").required());
        assert!(!schema.fields()[1].required);
    }

    #[test]
    fn test_from_json_rejects_blank_names() {
        let err = Schema::from_json(r#"[{"name": " ", "csv_name": "a"}]"#).unwrap_err();
        assert!(matches!(err, CsvesError::SchemaLoad(_)));

        let err = Schema::from_json(r#"[{"name": "a", "csv_name": ""}]"#).unwrap_err();
        assert!(matches!(err, CsvesError::SchemaLoad(_)));
    }

    #[test]
    fn test_from_json_rejects_wrong_shape() {
        let err = Schema::from_json(r#"{"name": "a"}"#).unwrap_err();
        assert!(matches!(err, CsvesError::SchemaLoad(_)));
    }

    #[test]
    fn test_load_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"[{"name": "sku", "csv_name": "SKU", "required": true}]"#)
            .unwrap();

        let schema = Schema::load(file.path()).unwrap();
        assert_eq!(schema.field_names(), vec!["sku"]);
        assert_eq!(schema.required_fields().count(), 1);
    }

    #[test]
    fn test_load_rejects_empty_list() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[]").unwrap();

        let err = Schema::load(file.path()).unwrap_err();
        assert!(matches!(err, CsvesError::SchemaLoad(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Schema::load("/nonexistent/fields.json").unwrap_err();
        assert!(matches!(err, CsvesError::SchemaLoad(_)));
    }

    #[test]
    fn test_narrowed_is_case_insensitive() {
        let schema = Schema::new(vec![
            FieldDefinition::new("Id", "id"),
            FieldDefinition::new("Name", "name"),
            FieldDefinition::new("Email", "email"),
        ]);

        let narrowed = schema.narrowed(&["email".to_string(), "ID".to_string()]);
        assert_eq!(narrowed.field_names(), vec!["Id", "Email"]);

        assert_eq!(schema.narrowed(&[]), schema);
    }

    #[test]
    fn test_lookup_key() {
        let field = FieldDefinition::new("email", "  E-Mail  Address ");
        assert_eq!(field.lookup_key(), "e-mail address");
    }

    #[test]
    fn test_parse_selection() {
        assert_eq!(parse_selection(" id, name ,,email "), vec!["id", "name", "email"]);
        assert!(parse_selection("").is_empty());
    }
}
