#![forbid(unsafe_code)]
#![deny(warnings)]
#![warn(clippy::pedantic)]

use loadgen_agent::Metrics;

#[test]
fn create_and_encode() {
    let m = Metrics::new().expect("metrics");
    let buf = m.encode_text().expect("encode");
    assert!(!buf.is_empty());
}

#[test]
fn export_counters_register_under_agent_prefix() {
    let m = Metrics::new().expect("metrics");
    m.export_success_total.inc();
    m.export_failure_total.inc();
    m.export_last_delta.set(42);
    let text = String::from_utf8(m.encode_text().expect("encode")).expect("utf8");
    assert!(text.contains("agent_export_success_total 1"));
    assert!(text.contains("agent_export_failure_total 1"));
    assert!(text.contains("agent_export_last_delta 42"));
}
