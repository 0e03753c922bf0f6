//! Ingest pipeline: file in, ordered document batch out.

use std::fs::File;
use std::io::{BufReader, Cursor, Read};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, info_span};

use crate::assemble::{RecordAssembler, SkippedRow};
use crate::document::DocumentBatch;
use crate::error::{CsvesError, Result};
use crate::header::HeaderIndex;
use crate::input::{
    LeadingSpaceTrim, SourceMetadata, describe_delimiter, detect_delimiter, read_sample_line,
    source_name,
};
use crate::schema::{Schema, resolve_schema};
use crate::text::normalize_text;

/// Configuration for an ingest run.
#[derive(Debug, Clone, Default)]
pub struct IngestConfig {
    /// Delimiter to use (None = auto-detect from the first line).
    pub delimiter: Option<u8>,
    /// Externally supplied schema (None or empty = infer from the header).
    pub schema: Option<Schema>,
    /// Field names to keep from the supplied schema (empty = keep all).
    pub selection: Vec<String>,
}

impl IngestConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.schema = Some(schema);
        self
    }

    pub fn with_selection(mut self, selection: Vec<String>) -> Self {
        self.selection = selection;
        self
    }
}

/// Everything produced by one ingest run.
#[derive(Debug, Clone, Serialize)]
pub struct IngestResult {
    /// Metadata about the source.
    pub source: SourceMetadata,
    /// Delimiter the rows were split on.
    pub delimiter: u8,
    /// Cleaned header row.
    pub header: Vec<String>,
    /// Schema used for every record.
    pub schema: Schema,
    /// Header lookup built from the first row.
    pub header_index: HeaderIndex,
    /// Documents in input order.
    pub batch: DocumentBatch,
    /// Malformed rows that were skipped.
    pub skipped: Vec<SkippedRow>,
}

impl IngestResult {
    /// Hand the batch over, dropping the rest.
    pub fn into_batch(self) -> DocumentBatch {
        self.batch
    }
}

/// Reads a delimited file and assembles its documents.
pub struct Ingestor {
    config: IngestConfig,
}

impl Ingestor {
    /// Create an ingestor with default configuration.
    pub fn new() -> Self {
        Self::with_config(IngestConfig::default())
    }

    /// Create an ingestor with custom configuration.
    pub fn with_config(config: IngestConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &IngestConfig {
        &self.config
    }

    /// Ingest a file from disk. The file is closed before this returns.
    pub fn ingest(&self, path: impl AsRef<Path>) -> Result<IngestResult> {
        let path = path.as_ref();

        let file = File::open(path).map_err(|e| CsvesError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        self.ingest_reader(file, path)
    }

    /// Ingest from any reader. `path` only supplies the source identifier.
    pub fn ingest_reader<R: Read>(&self, reader: R, path: impl AsRef<Path>) -> Result<IngestResult> {
        let path = path.as_ref();
        let source = source_name(path);
        let _span = info_span!("ingest", source = %source).entered();

        if let Some(schema) = &self.config.schema {
            schema.validate()?;
        }

        let mut reader = BufReader::new(reader);
        let (sample, first_line) = read_sample_line(&mut reader)?;

        let delimiter = match self.config.delimiter {
            Some(d) => d,
            None => {
                let detected = detect_delimiter(&first_line);
                info!("Detected delimiter: '{}'", describe_delimiter(detected));
                detected
            }
        };

        // Replay the sniffed line in front of the remaining stream.
        let replay = Cursor::new(sample).chain(reader);
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .flexible(false)
            .from_reader(LeadingSpaceTrim::new(replay, delimiter));

        let header: Vec<String> = rdr
            .byte_headers()?
            .iter()
            .map(|cell| normalize_text(&String::from_utf8_lossy(cell)))
            .collect();
        if header.is_empty() {
            return Err(CsvesError::EmptyInput("no header row found".to_string()));
        }

        let schema = resolve_schema(&header, self.config.schema.as_ref(), &self.config.selection);
        let header_index = HeaderIndex::build_for(&header, &schema)?;

        let assembler = RecordAssembler::new(&schema, &header_index, source);
        let assembly = assembler.assemble_records(rdr.byte_records());

        info!(
            records = assembly.batch.len(),
            skipped = assembly.skipped.len(),
            "Processed CSV records"
        );

        let source = SourceMetadata::new(
            PathBuf::from(path),
            delimiter,
            header.len(),
            assembly.batch.len(),
            assembly.skipped.len(),
        );

        Ok(IngestResult {
            source,
            delimiter,
            header,
            schema,
            header_index,
            batch: assembly.batch,
            skipped: assembly.skipped,
        })
    }
}

impl Default for Ingestor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::SOURCE_FIELD;
    use crate::schema::FieldDefinition;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_ingest_simple_csv() {
        let file = create_test_file("id,name\n1,Alice\n2,\n3\n");

        let result = Ingestor::new().ingest(file.path()).unwrap();

        assert_eq!(result.delimiter, b',');
        assert_eq!(result.batch.len(), 2);
        assert_eq!(result.skipped.len(), 1);
        assert_eq!(result.source.record_count, 2);
        assert_eq!(result.source.column_count, 2);

        let second = result.batch.get(1).unwrap();
        assert_eq!(second.get("id"), Some("2"));
        assert!(!second.contains("name"));
        assert_eq!(
            second.get(SOURCE_FIELD),
            Some(result.source.file.as_str())
        );
    }

    #[test]
    fn test_ingest_reader_detects_semicolon() {
        let data: &[u8] = b"ID; Full Name\n1;  Ann   Lee \n";
        let result = Ingestor::new().ingest_reader(data, "dir/sub/x.csv").unwrap();

        assert_eq!(result.delimiter, b';');
        assert_eq!(result.header, vec!["ID", "Full Name"]);
        let doc = result.batch.get(0).unwrap();
        assert_eq!(doc.get("Full Name"), Some("Ann Lee"));
        assert_eq!(doc.source(), Some("x.csv"));
    }

    #[test]
    fn test_explicit_delimiter_overrides_detection() {
        let data: &[u8] = b"a|b,c\n1|2,3\n";
        let config = IngestConfig::new().with_delimiter(b'|');
        let result = Ingestor::with_config(config).ingest_reader(data, "x.psv").unwrap();

        assert_eq!(result.header, vec!["a", "b,c"]);
        assert_eq!(result.batch.get(0).unwrap().get("b,c"), Some("2,3"));
    }

    #[test]
    fn test_empty_input() {
        let data: &[u8] = b"";
        let err = Ingestor::new().ingest_reader(data, "x.csv").unwrap_err();
        assert!(matches!(err, CsvesError::EmptyInput(_)));

        let config = IngestConfig::new().with_delimiter(b',');
        let err = Ingestor::with_config(config).ingest_reader(data, "x.csv").unwrap_err();
        assert!(matches!(err, CsvesError::EmptyInput(_)));
    }

    #[test]
    fn test_missing_required_field_aborts() {
        let data: &[u8] = b"Name\nAlice\n";
        let schema = Schema::new(vec![FieldDefinition::new("id", "id").required()]);
        let config = IngestConfig::new().with_schema(schema);

        let err = Ingestor::with_config(config).ingest_reader(data, "x.csv").unwrap_err();
        assert!(matches!(err, CsvesError::MissingRequiredField { .. }));
    }

    #[test]
    fn test_invalid_schema_rejected() {
        let data: &[u8] = b"id\n1\n";
        let schema = Schema::new(vec![FieldDefinition::new("", "id")]);
        let config = IngestConfig::new().with_schema(schema);

        let err = Ingestor::with_config(config).ingest_reader(data, "x.csv").unwrap_err();
        assert!(matches!(err, CsvesError::SchemaLoad(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = Ingestor::new().ingest("/nonexistent/data.csv").unwrap_err();
        assert!(matches!(err, CsvesError::Io { .. }));
    }

    #[test]
    fn test_header_only_file() {
        let data: &[u8] = b"id,name";
        let result = Ingestor::new().ingest_reader(data, "x.csv").unwrap();
        assert!(result.batch.is_empty());
        assert_eq!(result.schema.len(), 2);
    }

    #[test]
    fn test_quoted_value_after_spaced_delimiter() {
        let data: &[u8] = b"id, address\n1, \"12 Main St, Springfield\"\n";
        let result = Ingestor::new().ingest_reader(data, "f.csv").unwrap();

        assert!(result.skipped.is_empty());
        assert_eq!(result.header, vec!["id", "address"]);
        let doc = result.batch.get(0).unwrap();
        assert_eq!(doc.get("id"), Some("1"));
        assert_eq!(doc.get("address"), Some("12 Main St, Springfield"));
    }

    #[test]
    fn test_non_utf8_header_is_decoded_lossily() {
        let data: &[u8] = b"id,na\xffme\n1,x\n";
        let result = Ingestor::new().ingest_reader(data, "f.csv").unwrap();

        assert_eq!(result.header, vec!["id", "na\u{fffd}me"]);
        assert_eq!(result.batch.get(0).unwrap().get("na\u{fffd}me"), Some("x"));
    }

    #[test]
    fn test_non_utf8_row_is_kept() {
        let data: &[u8] = b"id,name\n1,Jos\xe9\n2,Ann\n";
        let result = Ingestor::new().ingest_reader(data, "f.csv").unwrap();

        assert!(result.skipped.is_empty());
        assert_eq!(result.batch.len(), 2);
        assert_eq!(result.batch.get(0).unwrap().get("name"), Some("Jos\u{fffd}"));
    }
}
