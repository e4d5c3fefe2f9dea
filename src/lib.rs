#![forbid(unsafe_code)]
#![deny(warnings)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod counter;
pub mod domain;
pub mod export;
pub mod http;
pub mod load_cpu;
pub mod load_mem;
pub mod metrics;
pub mod sink;

pub use config::Config;
pub use counter::RequestCounter;
pub use domain::{AppState, Stats, WorkQuery};
pub use export::{ExportLoop, MetricExporter};
pub use http::{healthz, scrape_metrics, serve, stats, work};
pub use metrics::Metrics;
pub use sink::{HttpSink, MetricSample, ResourceDescriptor, SinkError, TimeSeriesSink};
