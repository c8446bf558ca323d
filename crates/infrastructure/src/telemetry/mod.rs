pub mod prometheus;

pub use prometheus::{install_exporter, PrometheusMetrics};
