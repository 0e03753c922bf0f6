//! Bulk API wire format: NDJSON request body and per-item response parsing.

use serde::Deserialize;
use serde_json::{Value, json};

use crate::document::DocumentBatch;
use crate::error::{CsvesError, Result};

use super::provider::{BulkItem, BulkOutcome};

/// Encode a batch as a bulk request body.
///
/// Each document becomes an action line naming the target index followed by
/// its source line. Every line, the last included, ends with `\n`.
pub fn encode_bulk_body(index: &str, batch: &DocumentBatch) -> Result<String> {
    let action = serde_json::to_string(&json!({ "index": { "_index": index } }))?;

    let mut body = String::new();
    for doc in batch {
        body.push_str(&action);
        body.push('\n');
        body.push_str(&serde_json::to_string(doc)?);
        body.push('\n');
    }
    Ok(body)
}

#[derive(Debug, Deserialize)]
struct BulkResponse {
    #[serde(default)]
    errors: bool,
    #[serde(default)]
    items: Vec<serde_json::Map<String, Value>>,
}

#[derive(Debug, Deserialize)]
struct BulkResponseItem {
    #[serde(default)]
    status: Option<u16>,
    #[serde(default)]
    error: Option<Value>,
}

/// Parse a bulk response body into per-document outcomes.
///
/// `expected` is the number of documents sent; items missing from the
/// response are reported as failed.
pub fn parse_bulk_response(body: &str, expected: usize) -> Result<BulkOutcome> {
    let response: BulkResponse = serde_json::from_str(body)
        .map_err(|e| CsvesError::Sink(format!("Failed to parse bulk response: {}", e)))?;

    if !response.errors && response.items.is_empty() {
        return Ok(BulkOutcome::all_ok(expected));
    }

    let mut items = Vec::with_capacity(expected);
    for position in 0..expected {
        let item = response
            .items
            .get(position)
            .and_then(|action| action.values().next())
            .map(|value| serde_json::from_value::<BulkResponseItem>(value.clone()));

        let outcome = match item {
            Some(Ok(item)) => match item.error {
                Some(error) => BulkItem::failed(position, describe_error(&error)),
                None if item.status.is_some_and(|s| s >= 300) => {
                    BulkItem::failed(position, format!("status {}", item.status.unwrap_or_default()))
                }
                None => BulkItem::ok(position),
            },
            Some(Err(e)) => BulkItem::failed(position, format!("unreadable item: {}", e)),
            None => BulkItem::failed(position, "missing from bulk response"),
        };
        items.push(outcome);
    }

    Ok(BulkOutcome { items })
}

fn describe_error(error: &Value) -> String {
    match error {
        Value::Object(map) => {
            let kind = map.get("type").and_then(Value::as_str).unwrap_or("error");
            match map.get("reason").and_then(Value::as_str) {
                Some(reason) => format!("{}: {}", kind, reason),
                None => kind.to_string(),
            }
        }
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
