#![forbid(unsafe_code)]
#![deny(warnings)]
#![warn(clippy::pedantic)]

use anyhow::{Context, Result as AnyResult};
use prometheus::{Encoder, IntCounter, IntGauge, Opts, Registry, TextEncoder};

/// The agent's own operational metrics, scraped at `/metrics`.
/// Separate from the request counter that feeds the push pipeline.
#[derive(Clone)]
pub struct Metrics {
    pub registry: Registry,
    pub work_requests_total: IntCounter,
    pub export_success_total: IntCounter,
    pub export_failure_total: IntCounter,
    pub export_last_delta: IntGauge,
}

impl Metrics {
    pub fn new() -> AnyResult<Self> {
        let registry = Registry::new();
        let work_requests_total = IntCounter::with_opts(Opts::new(
            "agent_work_requests_total",
            "served /work requests",
        ))
        .context("create work_requests_total")?;
        let export_success_total = IntCounter::with_opts(Opts::new(
            "agent_export_success_total",
            "successful metric export cycles",
        ))
        .context("create export_success_total")?;
        let export_failure_total = IntCounter::with_opts(Opts::new(
            "agent_export_failure_total",
            "failed metric export cycles",
        ))
        .context("create export_failure_total")?;
        let export_last_delta = IntGauge::with_opts(Opts::new(
            "agent_export_last_delta",
            "delta pushed by the last successful export",
        ))
        .context("create export_last_delta")?;
        registry
            .register(Box::new(work_requests_total.clone()))
            .context("register work_requests_total")?;
        registry
            .register(Box::new(export_success_total.clone()))
            .context("register export_success_total")?;
        registry
            .register(Box::new(export_failure_total.clone()))
            .context("register export_failure_total")?;
        registry
            .register(Box::new(export_last_delta.clone()))
            .context("register export_last_delta")?;
        Ok(Self {
            registry,
            work_requests_total,
            export_success_total,
            export_failure_total,
            export_last_delta,
        })
    }

    pub fn encode_text(&self) -> AnyResult<Vec<u8>> {
        let mut buf = Vec::new();
        let encoder = TextEncoder::new();
        let mf = self.registry.gather();
        encoder.encode(&mf, &mut buf).context("encode metrics")?;
        Ok(buf)
    }
}
