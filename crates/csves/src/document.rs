//! Documents assembled from records, and the batch handed to a sink.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::Result;

/// Reserved field carrying the source file's base name.
pub const SOURCE_FIELD: &str = "source_csv";

/// Field name to value, iterated in insertion order.
///
/// Empty values are never stored; an unset field is simply absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    fields: IndexMap<String, String>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field. Returns `false` (and stores nothing) for an empty value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) -> bool {
        let value = value.into();
        if value.is_empty() {
            return false;
        }
        self.fields.insert(name.into(), value);
        true
    }

    /// Stamp the source identifier. It always ends up as the last field.
    pub fn set_source(&mut self, source: impl Into<String>) {
        self.fields.shift_remove(SOURCE_FIELD);
        self.fields.insert(SOURCE_FIELD.to_string(), source.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// The source identifier, if stamped.
    pub fn source(&self) -> Option<&str> {
        self.get(SOURCE_FIELD)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn fields(&self) -> &IndexMap<String, String> {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Documents in input row order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentBatch {
    documents: Vec<Document>,
}

impl DocumentBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, document: Document) {
        self.documents.push(document);
    }

    pub fn get(&self, index: usize) -> Option<&Document> {
        self.documents.get(index)
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Document> {
        self.documents.iter()
    }

    pub fn into_documents(self) -> Vec<Document> {
        self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// SHA-256 over the batch's JSON form.
    ///
    /// Equal batches always give equal fingerprints, so two runs over the
    /// same input can be compared without keeping both batches around.
    pub fn fingerprint(&self) -> Result<String> {
        let bytes = serde_json::to_vec(self)?;
        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        Ok(format!("sha256:{:x}", hasher.finalize()))
    }
}

impl From<Vec<Document>> for DocumentBatch {
    fn from(documents: Vec<Document>) -> Self {
        Self { documents }
    }
}

impl IntoIterator for DocumentBatch {
    type Item = Document;
    type IntoIter = std::vec::IntoIter<Document>;

    fn into_iter(self) -> Self::IntoIter {
        self.documents.into_iter()
    }
}

impl<'a> IntoIterator for &'a DocumentBatch {
    type Item = &'a Document;
    type IntoIter = std::slice::Iter<'a, Document>;

    fn into_iter(self) -> Self::IntoIter {
        self.documents.iter()
    }
}
