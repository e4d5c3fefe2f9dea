#![forbid(unsafe_code)]
#![deny(warnings)]
#![warn(clippy::pedantic)]

use async_trait::async_trait;
use loadgen_agent::{MetricExporter, MetricSample, SinkError, TimeSeriesSink};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Default)]
struct RecordingSink {
    samples: Mutex<Vec<MetricSample>>,
    fail_next: AtomicBool,
    calls: AtomicUsize,
}

#[async_trait]
impl TimeSeriesSink for RecordingSink {
    async fn append(&self, sample: &MetricSample) -> Result<(), SinkError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(SinkError::Rejected(503));
        }
        self.samples.lock().push(sample.clone());
        Ok(())
    }
}

fn exporter(sink: Arc<RecordingSink>) -> MetricExporter {
    MetricExporter::new(
        sink,
        "test-project".to_string(),
        "custom/testapi/request_count".to_string(),
    )
}

#[tokio::test]
async fn zero_delta_is_a_noop() {
    let sink = Arc::new(RecordingSink::default());
    let exp = exporter(sink.clone());
    exp.export_request_delta(0).await.expect("ok");
    assert_eq!(sink.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn negative_delta_is_a_noop() {
    let sink = Arc::new(RecordingSink::default());
    let exp = exporter(sink.clone());
    exp.export_request_delta(-3).await.expect("ok");
    assert_eq!(sink.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn positive_delta_submits_one_sample() {
    let sink = Arc::new(RecordingSink::default());
    let exp = exporter(sink.clone());
    let before = chrono::Utc::now();
    exp.export_request_delta(7).await.expect("ok");
    let after = chrono::Utc::now();

    assert_eq!(sink.calls.load(Ordering::SeqCst), 1);
    let samples = sink.samples.lock();
    assert_eq!(samples.len(), 1);
    let s = &samples[0];
    assert_eq!(s.value, 7);
    assert_eq!(s.metric_type, "custom/testapi/request_count");
    assert_eq!(s.labels.get("endpoint").map(String::as_str), Some("work"));
    assert_eq!(s.resource.resource_type, "global");
    assert_eq!(
        s.resource.labels.get("project_id").map(String::as_str),
        Some("test-project")
    );
    assert!(s.timestamp >= before && s.timestamp <= after);
}

#[tokio::test]
async fn failure_surfaces_without_retry() {
    let sink = Arc::new(RecordingSink::default());
    sink.fail_next.store(true, Ordering::SeqCst);
    let exp = exporter(sink.clone());
    let err = exp.export_request_delta(5).await.expect_err("must fail");
    assert!(matches!(err, SinkError::Rejected(503)));
    // Exactly one attempt, nothing recorded.
    assert_eq!(sink.calls.load(Ordering::SeqCst), 1);
    assert!(sink.samples.lock().is_empty());
}
