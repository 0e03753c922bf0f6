//! Delimiter detection from a sample line.

use std::io::BufRead;

use crate::error::{CsvesError, Result};

/// Candidate delimiters, in tie-breaking priority order.
pub const DELIMITERS: &[u8] = &[b',', b';', b'\t', b'|'];

/// Pick the candidate that occurs most often in `sample`.
///
/// Ties go to the earlier candidate in [`DELIMITERS`], so a line without any
/// candidate falls back to comma. Quoted values are not taken into account.
pub fn detect_delimiter(sample: &str) -> u8 {
    let mut best_delimiter = b',';
    let mut best_count = 0;

    for &delim in DELIMITERS {
        let count = sample.bytes().filter(|&b| b == delim).count();
        if count > best_count {
            best_count = count;
            best_delimiter = delim;
        }
    }

    best_delimiter
}

/// Read the first line of `reader` for sniffing, without its line terminator.
///
/// Returns the raw bytes consumed (terminator included) alongside the text so
/// the caller can replay them in front of the rest of the stream.
pub fn read_sample_line<R: BufRead>(reader: &mut R) -> Result<(Vec<u8>, String)> {
    let mut raw = Vec::new();
    let read = reader
        .read_until(b'\n', &mut raw)
        .map_err(|e| CsvesError::EmptyInput(format!("could not read first line: {}", e)))?;

    if read == 0 {
        return Err(CsvesError::EmptyInput("no header line found".to_string()));
    }

    let line = String::from_utf8_lossy(&raw)
        .trim_end_matches(['\r', '\n'])
        .to_string();
    Ok((raw, line))
}

/// Parse a user-supplied delimiter option.
///
/// Accepts a single ASCII character, or `\t` / `tab` for a tab.
pub fn parse_delimiter(value: &str) -> Result<u8> {
    match value {
        "\\t" | "tab" | "TAB" | "\t" => Ok(b'\t'),
        s if s.len() == 1 && s.is_ascii() => {
            let byte = s.as_bytes()[0];
            if byte == b'"' || byte == b'\n' || byte == b'\r' {
                Err(CsvesError::InvalidDelimiter(format!("{:?} cannot separate fields", s)))
            } else {
                Ok(byte)
            }
        }
        _ => Err(CsvesError::InvalidDelimiter(format!(
            "expected a single ASCII character, got {:?}",
            value
        ))),
    }
}

/// Format name for a delimiter, as recorded in source metadata.
pub fn delimiter_format(delimiter: u8) -> &'static str {
    match delimiter {
        b'\t' => "tsv",
        b',' => "csv",
        b';' => "csv-semicolon",
        b'|' => "psv",
        _ => "delimited",
    }
}

/// Printable form of a delimiter for diagnostics.
pub fn describe_delimiter(delimiter: u8) -> String {
    match delimiter {
        b'\t' => "\\t".to_string(),
        other => (other as char).to_string(),
    }
}
