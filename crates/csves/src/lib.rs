//! csves: load delimited text files into a search index.
//!
//! A file's header is mapped onto a field schema (supplied or inferred), every
//! data row is cleaned and turned into a document, and the resulting batch is
//! handed to a sink such as Elasticsearch.
//!
//! # Pipeline
//!
//! - **Delimiter detection**: comma, semicolon, tab or pipe, from the first line
//! - **Schema resolution**: configured field definitions, or one field per header
//! - **Header mapping**: case-insensitive, with required-field validation
//! - **Record assembly**: normalized values, empty values dropped, malformed rows skipped
//!
//! # Example
//!
//! ```no_run
//! use csves::{Ingestor, MemorySink, DocumentSink};
//!
//! let result = Ingestor::new().ingest("people.csv").unwrap();
//! println!("Fields: {:?}", result.schema.field_names());
//!
//! let mut sink = MemorySink::new();
//! let outcome = sink.write_batch(result.into_batch()).unwrap();
//! println!("Indexed {}", outcome.succeeded());
//! ```

pub mod error;
pub mod input;
pub mod schema;
pub mod sink;

mod assemble;
mod document;
mod header;
mod pipeline;
mod report;
mod text;

pub use assemble::{Assembly, RecordAssembler, SkippedRow};
pub use document::{Document, DocumentBatch, SOURCE_FIELD};
pub use error::{CsvesError, Result};
pub use header::HeaderIndex;
pub use input::{SourceMetadata, detect_delimiter, parse_delimiter};
pub use pipeline::{IngestConfig, IngestResult, Ingestor};
pub use report::{BatchReporter, ReportMode, SAMPLE_SIZE};
pub use schema::{FieldDefinition, Schema, parse_selection, resolve_schema};
pub use sink::{
    BulkItem, BulkOutcome, DocumentSink, ElasticsearchConfig, ElasticsearchSink, MemorySink,
};
pub use text::normalize_text;
