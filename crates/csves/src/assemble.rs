//! Turn data records into documents.

use std::borrow::Cow;

use csv::ByteRecord;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::document::{Document, DocumentBatch};
use crate::error::CsvesError;
use crate::header::HeaderIndex;
use crate::schema::Schema;
use crate::text::normalize_text;

/// A data row that could not be parsed and was left out of the batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRow {
    /// Line where the record starts (1-based, 0 when unknown).
    pub line: u64,
    pub message: String,
}

/// Documents produced from a run of records, plus the rows that were skipped.
#[derive(Debug, Clone, Default)]
pub struct Assembly {
    pub batch: DocumentBatch,
    pub skipped: Vec<SkippedRow>,
}

/// Builds documents from records using a resolved schema and header index.
pub struct RecordAssembler<'a> {
    schema: &'a Schema,
    source: String,
    /// Header position for each schema field, resolved once.
    positions: Vec<Option<usize>>,
}

impl<'a> RecordAssembler<'a> {
    /// Create an assembler that stamps documents with `source`.
    pub fn new(schema: &'a Schema, index: &'a HeaderIndex, source: impl Into<String>) -> Self {
        let positions = schema
            .iter()
            .map(|field| index.position(&field.source_column))
            .collect();

        Self {
            schema,
            source: source.into(),
            positions,
        }
    }

    /// Build a document from one row of raw cell values.
    ///
    /// Cells are normalized; fields whose column is absent or whose value is
    /// empty stay unset.
    pub fn assemble<S: AsRef<str>>(&self, cells: &[S]) -> Document {
        let mut doc = Document::new();

        for (field, position) in self.schema.iter().zip(&self.positions) {
            let Some(&idx) = position.as_ref() else {
                continue;
            };
            if let Some(raw) = cells.get(idx) {
                doc.set(field.name.clone(), normalize_text(raw.as_ref()));
            }
        }

        doc.set_source(self.source.clone());
        doc
    }

    /// Assemble every record, skipping (and logging) the malformed ones.
    ///
    /// Cells are decoded as UTF-8, with invalid bytes replaced.
    pub fn assemble_records<I>(&self, records: I) -> Assembly
    where
        I: IntoIterator<Item = Result<ByteRecord, csv::Error>>,
    {
        let mut assembly = Assembly::default();

        for result in records {
            match result {
                Ok(record) => {
                    let cells: Vec<Cow<'_, str>> =
                        record.iter().map(String::from_utf8_lossy).collect();
                    assembly.batch.push(self.assemble(cells.as_slice()));
                }
                Err(e) => {
                    let err = CsvesError::malformed_row(&e);
                    warn!(source = %self.source, "Skipping CSV record: {}", err);
                    if let CsvesError::MalformedRow { line, message } = err {
                        assembly.skipped.push(SkippedRow { line, message });
                    }
                }
            }
        }

        assembly
    }
}
