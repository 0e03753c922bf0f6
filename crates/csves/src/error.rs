//! Error types for the csves library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for csves operations.
#[derive(Debug, Error)]
pub enum CsvesError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The source has no readable first line.
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// A data row could not be parsed under the current delimiter/quoting rules.
    ///
    /// Never fatal inside the pipeline: the row is skipped and reported.
    #[error("Malformed row at line {line}: {message}")]
    MalformedRow { line: u64, message: String },

    /// A required schema field has no matching header column.
    #[error("required field '{field}' (column '{column}') not found in CSV header")]
    MissingRequiredField { field: String, column: String },

    /// The externally supplied schema is unreadable or invalid.
    #[error("Schema load error: {0}")]
    SchemaLoad(String),

    /// Invalid delimiter specified.
    #[error("Invalid delimiter: {0}")]
    InvalidDelimiter(String),

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The document sink rejected a request.
    #[error("Sink error: {0}")]
    Sink(String),
}

impl CsvesError {
    /// Build a `MalformedRow` from a record-level CSV error.
    pub fn malformed_row(err: &csv::Error) -> Self {
        let line = err.position().map(|p| p.line()).unwrap_or(0);
        let message = match err.kind() {
            csv::ErrorKind::UnequalLengths {
                expected_len, len, ..
            } => format!("expected {} fields, found {}", expected_len, len),
            _ => err.to_string(),
        };
        CsvesError::MalformedRow { line, message }
    }
}

/// Result type alias for csves operations.
pub type Result<T> = std::result::Result<T, CsvesError>;
