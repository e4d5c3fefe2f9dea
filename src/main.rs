#![forbid(unsafe_code)]
#![deny(warnings)]
#![warn(clippy::pedantic)]

use std::sync::Arc;

use loadgen_agent::{
    serve, AppState, Config, ExportLoop, HttpSink, MetricExporter, Metrics, RequestCounter,
};
use tracing::{error, info, warn};

fn init_tracing() {
    let fmt = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env());
    fmt.json().init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let cfg = Config::from_env();
    let metrics = Metrics::new()?;
    let counter = Arc::new(RequestCounter::new());

    match &cfg.project_id {
        None => {
            warn!("no project id configured, metric export disabled");
        }
        Some(project_id) => match HttpSink::new(&cfg.endpoint) {
            Err(e) => {
                // Export stays off for the process lifetime; serving continues.
                let chain = format!("{:#}", anyhow::Error::new(e));
                error!(error = %chain, "metric exporter init failed, export disabled");
            }
            Ok(sink) => {
                info!(
                    project_id,
                    metric_type = %cfg.metric_type,
                    endpoint = %cfg.endpoint,
                    interval_secs = cfg.push_interval.as_secs(),
                    "metric exporter initialized"
                );
                let exporter = MetricExporter::new(
                    Arc::new(sink),
                    project_id.clone(),
                    cfg.metric_type.clone(),
                );
                let export_loop = ExportLoop::new(
                    counter.clone(),
                    exporter,
                    metrics.clone(),
                    cfg.push_interval,
                );
                tokio::spawn(export_loop.run());
            }
        },
    }

    let state = AppState { counter, metrics };
    info!(bind = %cfg.bind, "http server listening");
    serve(&cfg.bind, state).await?;
    Ok(())
}
