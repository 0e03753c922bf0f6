//! Printing batches for inspection before they reach a sink.

use std::io::{self, Write};

use crate::document::{DocumentBatch, SOURCE_FIELD};
use crate::schema::Schema;

/// Number of documents shown in sample mode.
pub const SAMPLE_SIZE: usize = 2;

/// How much of a batch to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportMode {
    /// Every document, one line per non-empty schema field.
    Full,
    /// The first [`SAMPLE_SIZE`] documents as raw field maps.
    Sample,
}

/// Writes a human-readable view of a batch.
pub struct BatchReporter<'a> {
    schema: &'a Schema,
}

impl<'a> BatchReporter<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        Self { schema }
    }

    /// Write the batch in the given mode, followed by the record total.
    pub fn write<W: Write>(&self, batch: &DocumentBatch, mode: ReportMode, out: &mut W) -> io::Result<()> {
        match mode {
            ReportMode::Full => self.write_full(batch, out)?,
            ReportMode::Sample => self.write_sample(batch, out)?,
        }
        writeln!(out, "Total records processed: {}", batch.len())
    }

    /// Render to a string.
    pub fn render(&self, batch: &DocumentBatch, mode: ReportMode) -> io::Result<String> {
        let mut buf = Vec::new();
        self.write(batch, mode, &mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    fn write_full<W: Write>(&self, batch: &DocumentBatch, out: &mut W) -> io::Result<()> {
        writeln!(out, "Printing all processed records:")?;
        for (i, doc) in batch.iter().enumerate() {
            writeln!(out, "Record {}:", i + 1)?;
            for field in self.schema {
                if field.name == SOURCE_FIELD {
                    continue;
                }
                if let Some(value) = doc.get(&field.name) {
                    writeln!(out, "  {}: {}", field.name, value)?;
                }
            }
            writeln!(out, "  {}: {}", SOURCE_FIELD, doc.source().unwrap_or_default())?;
            writeln!(out)?;
        }
        Ok(())
    }

    fn write_sample<W: Write>(&self, batch: &DocumentBatch, out: &mut W) -> io::Result<()> {
        writeln!(out, "Sample of processed records:")?;
        for doc in batch.iter().take(SAMPLE_SIZE) {
            let fields = serde_json::to_string(doc).map_err(io::Error::other)?;
            writeln!(out, "Fields: {}", fields)?;
        }
        Ok(())
    }
}
