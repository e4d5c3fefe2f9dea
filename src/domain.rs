#![forbid(unsafe_code)]
#![deny(warnings)]
#![warn(clippy::pedantic)]

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::counter::RequestCounter;
use crate::metrics::Metrics;

/// Shared handler state. The counter handle is the same one the export loop
/// drains; it is injected here rather than living in a process-wide global.
#[derive(Clone)]
pub struct AppState {
    pub counter: Arc<RequestCounter>,
    pub metrics: Metrics,
}

/// Raw `/work` query parameters. Values that are missing, unparseable, or
/// negative are treated as 0, never rejected.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct WorkQuery {
    pub cpu_ms: Option<String>,
    pub mem_mb: Option<String>,
}

fn parse_non_negative(raw: Option<&str>) -> u64 {
    raw.and_then(|v| v.parse::<i64>().ok())
        .and_then(|n| u64::try_from(n).ok())
        .unwrap_or(0)
}

impl WorkQuery {
    pub fn cpu_ms(&self) -> u64 {
        parse_non_negative(self.cpu_ms.as_deref())
    }

    pub fn mem_mb(&self) -> u64 {
        parse_non_negative(self.mem_mb.as_deref())
    }
}

/// `/stats` response body.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Stats {
    pub total_requests: u64,
}
