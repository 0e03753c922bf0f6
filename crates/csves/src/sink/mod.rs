//! Destinations for assembled document batches.
//!
//! A sink receives the whole batch at once and reports, per document, whether
//! it was stored.
//!
//! # Supported Sinks
//!
//! - **Elasticsearch** - bulk API over HTTP, with optional basic auth and a custom CA
//! - **Memory** - keeps batches in memory, for tests and dry runs

mod bulk;
mod elasticsearch;
mod memory;
mod provider;

pub use bulk::{encode_bulk_body, parse_bulk_response};
pub use elasticsearch::{DEFAULT_INDEX, DEFAULT_URL, ElasticsearchConfig, ElasticsearchSink};
pub use memory::MemorySink;
pub use provider::{BulkItem, BulkOutcome, DocumentSink};
