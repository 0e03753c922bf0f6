//! In-memory sink for testing and dry runs.

use std::collections::BTreeSet;

use crate::document::{Document, DocumentBatch};
use crate::error::Result;

use super::provider::{BulkItem, BulkOutcome, DocumentSink};

/// Sink that keeps every batch it receives.
#[derive(Debug, Default)]
pub struct MemorySink {
    batches: Vec<DocumentBatch>,
    reject: BTreeSet<usize>,
    prepared: bool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject the documents at these batch positions on every write.
    pub fn rejecting(positions: impl IntoIterator<Item = usize>) -> Self {
        Self {
            reject: positions.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn batches(&self) -> &[DocumentBatch] {
        &self.batches
    }

    /// Accepted documents across all batches, in write order.
    pub fn documents(&self) -> impl Iterator<Item = &Document> {
        self.batches.iter().flat_map(|b| b.iter())
    }

    pub fn is_prepared(&self) -> bool {
        self.prepared
    }
}

impl DocumentSink for MemorySink {
    fn name(&self) -> &str {
        "memory"
    }

    fn prepare(&mut self) -> Result<()> {
        self.prepared = true;
        Ok(())
    }

    fn write_batch(&mut self, batch: DocumentBatch) -> Result<BulkOutcome> {
        let mut accepted = DocumentBatch::new();
        let mut items = Vec::with_capacity(batch.len());

        for (position, doc) in batch.into_iter().enumerate() {
            if self.reject.contains(&position) {
                items.push(BulkItem::failed(position, "rejected by memory sink"));
            } else {
                accepted.push(doc);
                items.push(BulkItem::ok(position));
            }
        }

        self.batches.push(accepted);
        Ok(BulkOutcome { items })
    }
}
