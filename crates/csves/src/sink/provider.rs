//! Sink trait and bulk write outcomes.

use serde::{Deserialize, Serialize};

use crate::document::DocumentBatch;
use crate::error::Result;

/// Result of writing one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkItem {
    /// Position of the document in the batch.
    pub position: usize,
    /// Why the sink rejected the document, if it did.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BulkItem {
    pub fn ok(position: usize) -> Self {
        Self {
            position,
            error: None,
        }
    }

    pub fn failed(position: usize, reason: impl Into<String>) -> Self {
        Self {
            position,
            error: Some(reason.into()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Per-document outcomes of a bulk write, in batch order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkOutcome {
    pub items: Vec<BulkItem>,
}

impl BulkOutcome {
    /// Every position in `0..count` succeeded.
    pub fn all_ok(count: usize) -> Self {
        Self {
            items: (0..count).map(BulkItem::ok).collect(),
        }
    }

    pub fn succeeded(&self) -> usize {
        self.items.iter().filter(|i| i.is_ok()).count()
    }

    pub fn failed(&self) -> impl Iterator<Item = &BulkItem> {
        self.items.iter().filter(|i| !i.is_ok())
    }

    pub fn has_failures(&self) -> bool {
        self.items.iter().any(|i| !i.is_ok())
    }
}

/// A store that accepts whole document batches.
pub trait DocumentSink {
    /// Name of this sink (for logging).
    fn name(&self) -> &str;

    /// Make sure the destination exists before the first write.
    fn prepare(&mut self) -> Result<()>;

    /// Store a batch, taking ownership of it.
    ///
    /// Transport-level failures are errors; documents the store rejected
    /// individually are reported in the outcome.
    fn write_batch(&mut self, batch: DocumentBatch) -> Result<BulkOutcome>;
}
