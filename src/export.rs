#![forbid(unsafe_code)]
#![deny(warnings)]
#![warn(clippy::pedantic)]

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info};

use crate::counter::RequestCounter;
use crate::metrics::Metrics;
use crate::sink::{MetricSample, ResourceDescriptor, SinkError, TimeSeriesSink};

/// Turns a positive request-count delta into one backend submission.
///
/// Delivery is at-most-once: a failed submission is reported to the caller
/// and the delta is lost for metrics purposes. The counter is never
/// re-credited and there is no retry buffer.
#[derive(Clone)]
pub struct MetricExporter {
    sink: Arc<dyn TimeSeriesSink>,
    project_id: String,
    metric_type: String,
}

impl MetricExporter {
    pub fn new(sink: Arc<dyn TimeSeriesSink>, project_id: String, metric_type: String) -> Self {
        Self {
            sink,
            project_id,
            metric_type,
        }
    }

    /// Submit `delta` as one sample stamped with the current time.
    /// Values <= 0 mean "nothing happened" and produce no backend call.
    pub async fn export_request_delta(&self, delta: i64) -> Result<(), SinkError> {
        if delta <= 0 {
            return Ok(());
        }
        let mut labels = HashMap::new();
        labels.insert("endpoint".to_string(), "work".to_string());
        let sample = MetricSample {
            metric_type: self.metric_type.clone(),
            value: delta,
            timestamp: chrono::Utc::now(),
            labels,
            resource: ResourceDescriptor::global(&self.project_id),
        };
        self.sink.append(&sample).await
    }
}

/// Periodic snapshot-and-push task, decoupled from request serving.
///
/// The counter lock is taken only inside `snapshot`; it is released before
/// the network submission starts, so a slow backend never blocks handlers.
pub struct ExportLoop {
    counter: Arc<RequestCounter>,
    exporter: MetricExporter,
    metrics: Metrics,
    period: Duration,
}

impl ExportLoop {
    pub fn new(
        counter: Arc<RequestCounter>,
        exporter: MetricExporter,
        metrics: Metrics,
        period: Duration,
    ) -> Self {
        Self {
            counter,
            exporter,
            metrics,
            period,
        }
    }

    /// Run forever on a fixed-period timer. A failed cycle logs and waits
    /// for the next tick; nothing here can stop the loop or the process.
    pub async fn run(self) {
        let mut ticker = tokio::time::interval(self.period);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // The first tick fires immediately; burn it so the first real cycle
        // covers a full period.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            self.run_once().await;
        }
    }

    /// One export cycle: snapshot, skip zero deltas, push the rest.
    pub async fn run_once(&self) {
        let delta = self.counter.snapshot();
        if delta == 0 {
            debug!("no requests since last export, skipping");
            return;
        }
        let delta = i64::try_from(delta).unwrap_or(i64::MAX);
        match self.exporter.export_request_delta(delta).await {
            Ok(()) => {
                self.metrics.export_success_total.inc();
                self.metrics.export_last_delta.set(delta);
                info!(delta, "exported request_count delta");
            }
            Err(e) => {
                self.metrics.export_failure_total.inc();
                let chain = format!("{:#}", anyhow::Error::new(e));
                error!(error = %chain, delta, "export metric failed");
            }
        }
    }
}
