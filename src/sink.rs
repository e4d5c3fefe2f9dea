#![forbid(unsafe_code)]
#![deny(warnings)]
#![warn(clippy::pedantic)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("metrics client construction failed")]
    ClientInit(#[source] BoxError),
    #[error("sample submission failed")]
    Submit(#[source] BoxError),
    #[error("metrics backend returned status {0}")]
    Rejected(u16),
}

/// One observation pushed to the time-series backend.
#[derive(Clone, Debug, Serialize)]
pub struct MetricSample {
    pub metric_type: String,
    pub value: i64,
    pub timestamp: DateTime<Utc>,
    pub labels: HashMap<String, String>,
    pub resource: ResourceDescriptor,
}

#[derive(Clone, Debug, Serialize)]
pub struct ResourceDescriptor {
    #[serde(rename = "type")]
    pub resource_type: String,
    pub labels: HashMap<String, String>,
}

impl ResourceDescriptor {
    /// The fixed `global` resource the agent reports under.
    pub fn global(project_id: &str) -> Self {
        let mut labels = HashMap::new();
        labels.insert("project_id".to_string(), project_id.to_string());
        Self {
            resource_type: "global".to_string(),
            labels,
        }
    }
}

/// Narrow backend capability: append one labeled numeric sample.
///
/// The concrete backend is swappable behind this trait; tests use an
/// in-memory recorder.
#[async_trait]
pub trait TimeSeriesSink: Send + Sync {
    async fn append(&self, sample: &MetricSample) -> Result<(), SinkError>;
}

/// Pushes samples as JSON over HTTP to the configured ingest endpoint.
pub struct HttpSink {
    client: reqwest::Client,
    endpoint: String,
}

const SUBMIT_TIMEOUT: Duration = Duration::from_secs(5);

impl HttpSink {
    /// Build the client once at startup. Every request carries a deadline so
    /// a hung backend surfaces as an ordinary submission failure.
    pub fn new(endpoint: &str) -> Result<Self, SinkError> {
        let client = reqwest::Client::builder()
            .timeout(SUBMIT_TIMEOUT)
            .build()
            .map_err(|e| SinkError::ClientInit(Box::new(e)))?;
        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
        })
    }
}

#[async_trait]
impl TimeSeriesSink for HttpSink {
    async fn append(&self, sample: &MetricSample) -> Result<(), SinkError> {
        let resp = self
            .client
            .post(&self.endpoint)
            .json(sample)
            .send()
            .await
            .map_err(|e| SinkError::Submit(Box::new(e)))?;
        if !resp.status().is_success() {
            return Err(SinkError::Rejected(resp.status().as_u16()));
        }
        Ok(())
    }
}
