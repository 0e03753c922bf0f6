//! Elasticsearch sink over the bulk API.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use serde_json::json;
use tracing::{debug, info, warn};

use crate::document::{DocumentBatch, SOURCE_FIELD};
use crate::error::{CsvesError, Result};

use super::bulk::{encode_bulk_body, parse_bulk_response};
use super::provider::{BulkOutcome, DocumentSink};

/// Default cluster address.
pub const DEFAULT_URL: &str = "http://localhost:9200";

/// Default index name.
pub const DEFAULT_INDEX: &str = "csv_data";

/// Connection settings for an Elasticsearch cluster.
#[derive(Debug, Clone)]
pub struct ElasticsearchConfig {
    /// Base URL of the cluster.
    pub url: String,
    /// Index the documents are written to.
    pub index: String,
    /// Basic auth user (no auth when None).
    pub username: Option<String>,
    pub password: Option<String>,
    /// PEM file with an extra CA certificate to trust.
    pub ca_cert: Option<PathBuf>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for ElasticsearchConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            index: DEFAULT_INDEX.to_string(),
            username: None,
            password: None,
            ca_cert: None,
            timeout: Duration::from_secs(60),
        }
    }
}

impl ElasticsearchConfig {
    pub fn new(url: impl Into<String>, index: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            index: index.into(),
            ..Self::default()
        }
    }

    pub fn with_credentials(mut self, username: impl Into<String>, password: Option<String>) -> Self {
        self.username = Some(username.into());
        self.password = password;
        self
    }

    pub fn with_ca_cert(mut self, path: impl Into<PathBuf>) -> Self {
        self.ca_cert = Some(path.into());
        self
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.url.trim_end_matches('/'), path)
    }
}

/// Writes batches to one Elasticsearch index.
pub struct ElasticsearchSink {
    client: Client,
    config: ElasticsearchConfig,
}

impl ElasticsearchSink {
    /// Create a sink for the default local cluster and index.
    pub fn new() -> Result<Self> {
        Self::with_config(ElasticsearchConfig::default())
    }

    /// Create a sink with custom configuration.
    pub fn with_config(config: ElasticsearchConfig) -> Result<Self> {
        if config.index.trim().is_empty() {
            return Err(CsvesError::Config("index name must not be empty".to_string()));
        }

        let mut builder = Client::builder().timeout(config.timeout);

        if let Some(path) = &config.ca_cert {
            let pem = fs::read(path).map_err(|e| CsvesError::Io {
                path: path.clone(),
                source: e,
            })?;
            let cert = reqwest::Certificate::from_pem(&pem).map_err(|e| {
                CsvesError::Config(format!("Invalid CA certificate '{}': {}", path.display(), e))
            })?;
            builder = builder.add_root_certificate(cert);
        }

        let client = builder
            .build()
            .map_err(|e| CsvesError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ElasticsearchConfig {
        &self.config
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.username {
            Some(user) => request.basic_auth(user, self.config.password.as_deref()),
            None => request,
        }
    }

    /// Mapping used when the index has to be created.
    fn index_mapping() -> serde_json::Value {
        json!({
            "mappings": {
                "properties": {
                    (SOURCE_FIELD): { "type": "keyword" }
                },
                "dynamic": true
            }
        })
    }

    fn create_index(&self) -> Result<()> {
        let response = self
            .authorize(self.client.put(self.config.endpoint(&self.config.index)))
            .json(&Self::index_mapping())
            .send()
            .map_err(|e| CsvesError::Sink(format!("Create index request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().unwrap_or_default();
            return Err(CsvesError::Sink(format!(
                "Error creating index ({}): {}",
                status, error_text
            )));
        }

        info!(index = %self.config.index, "Created index");
        Ok(())
    }
}

impl DocumentSink for ElasticsearchSink {
    fn name(&self) -> &str {
        "elasticsearch"
    }

    fn prepare(&mut self) -> Result<()> {
        let response = self
            .authorize(self.client.head(self.config.endpoint(&self.config.index)))
            .send()
            .map_err(|e| CsvesError::Sink(format!("Index existence check failed: {}", e)))?;

        match response.status() {
            StatusCode::NOT_FOUND => self.create_index(),
            status if status.is_success() => {
                debug!(index = %self.config.index, "Index already exists");
                Ok(())
            }
            status => Err(CsvesError::Sink(format!(
                "Unexpected status checking index '{}': {}",
                self.config.index, status
            ))),
        }
    }

    fn write_batch(&mut self, batch: DocumentBatch) -> Result<BulkOutcome> {
        if batch.is_empty() {
            return Ok(BulkOutcome::default());
        }

        let body = encode_bulk_body(&self.config.index, &batch)?;
        let response = self
            .authorize(self.client.post(self.config.endpoint("_bulk")))
            .header(CONTENT_TYPE, HeaderValue::from_static("application/x-ndjson"))
            .body(body)
            .send()
            .map_err(|e| CsvesError::Sink(format!("Bulk request failed: {}", e)))?;

        let status = response.status();
        let text = response
            .text()
            .map_err(|e| CsvesError::Sink(format!("Failed to read bulk response: {}", e)))?;

        if !status.is_success() {
            return Err(CsvesError::Sink(format!(
                "Bulk indexing failed ({}): {}",
                status, text
            )));
        }

        let outcome = parse_bulk_response(&text, batch.len())?;
        for item in outcome.failed() {
            warn!(
                position = item.position,
                "Document failed to index: {}",
                item.error.as_deref().unwrap_or_default()
            );
        }
        Ok(outcome)
    }
}
