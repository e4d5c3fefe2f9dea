#![forbid(unsafe_code)]
#![deny(warnings)]
#![warn(clippy::pedantic)]

use std::time::Duration;

pub const DEFAULT_METRIC_TYPE: &str = "custom.googleapis.com/testapi/request_count";
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8089/v1/timeseries";
pub const DEFAULT_BIND: &str = "0.0.0.0:8080";
pub const DEFAULT_PUSH_INTERVAL: Duration = Duration::from_secs(10);

/// Process configuration, read from the environment.
///
/// A missing project id is not an error: the service runs and serves load,
/// it just never pushes metrics.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind: String,
    pub project_id: Option<String>,
    pub metric_type: String,
    pub endpoint: String,
    pub push_interval: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let project_id = get("GCP_PROJECT")
            .filter(|v| !v.is_empty())
            .or_else(|| get("GOOGLE_CLOUD_PROJECT").filter(|v| !v.is_empty()));
        let metric_type = get("METRIC_TYPE")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_METRIC_TYPE.to_string());
        let endpoint = get("MONITORING_ENDPOINT")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        // Unparseable or non-positive intervals fall back to the default.
        let push_interval = get("METRIC_PUSH_INTERVAL_SEC")
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|n| *n > 0)
            .map_or(DEFAULT_PUSH_INTERVAL, Duration::from_secs);
        let bind = get("BIND_ADDR")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_BIND.to_string());
        Self {
            bind,
            project_id,
            metric_type,
            endpoint,
            push_interval,
        }
    }
}
