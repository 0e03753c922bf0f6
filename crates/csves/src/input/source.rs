//! Description of an ingested source file.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::delimiter::{delimiter_format, describe_delimiter};

/// Metadata about one ingest run over a source file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name without path; this is the value stamped on every document.
    pub file: String,
    /// Path as given by the caller.
    pub path: PathBuf,
    /// Delimiter used to split rows.
    pub delimiter: String,
    /// Detected format (csv, tsv, etc.).
    pub format: String,
    /// Number of header columns.
    pub column_count: usize,
    /// Number of documents produced.
    pub record_count: usize,
    /// Number of malformed rows that were skipped.
    pub skipped_count: usize,
    /// When the ingest finished.
    pub ingested_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Create metadata for a source that has been ingested.
    pub fn new(
        path: PathBuf,
        delimiter: u8,
        column_count: usize,
        record_count: usize,
        skipped_count: usize,
    ) -> Self {
        let file = source_name(&path);

        Self {
            file,
            path,
            delimiter: describe_delimiter(delimiter),
            format: delimiter_format(delimiter).to_string(),
            column_count,
            record_count,
            skipped_count,
            ingested_at: Utc::now(),
        }
    }
}

/// Base name of a path, used as the document source identifier.
pub(crate) fn source_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
