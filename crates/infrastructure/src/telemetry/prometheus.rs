use metrics::counter;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tracing::info;
use txtdirect_application::ports::MetricsRecorder;
use txtdirect_domain::{ConfigError, FallbackMode};

pub const REQUESTS_BY_TYPE: &str = "txtdirect_requests_by_type";
pub const REQUESTS_BY_STATUS: &str = "txtdirect_requests_by_status";
pub const PATH_REDIRECTS: &str = "txtdirect_path_redirects";
pub const FALLBACKS: &str = "txtdirect_fallbacks";

/// Counters emitted through the global `metrics` recorder.
///
/// Without an installed exporter every call is a no-op.
#[derive(Debug, Default, Clone, Copy)]
pub struct PrometheusMetrics;

impl PrometheusMetrics {
    pub fn new() -> Self {
        Self
    }
}

impl MetricsRecorder for PrometheusMetrics {
    fn count_type(&self, host: &str, redirect_type: &str) {
        counter!(REQUESTS_BY_TYPE, "host" => host.to_string(), "type" => redirect_type.to_string())
            .increment(1);
    }

    fn count_status(&self, host: &str, status: u16) {
        counter!(REQUESTS_BY_STATUS, "host" => host.to_string(), "status" => status.to_string())
            .increment(1);
    }

    fn count_path(&self, host: &str, path: &str) {
        counter!(PATH_REDIRECTS, "host" => host.to_string(), "path" => path.to_string())
            .increment(1);
    }

    fn count_fallback(&self, host: &str, mode: FallbackMode) {
        counter!(FALLBACKS, "host" => host.to_string(), "type" => mode.as_str())
            .increment(1);
    }
}

/// Installs the global recorder and serves `/metrics` on `address`.
///
/// Must run inside a tokio runtime.
pub fn install_exporter(address: &str) -> Result<SocketAddr, ConfigError> {
    let addr: SocketAddr = address
        .parse()
        .map_err(|e| ConfigError::Validation(format!("Invalid metrics.address '{}': {}", address, e)))?;

    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| ConfigError::Validation(format!("Cannot start Prometheus exporter: {}", e)))?;

    info!(%addr, "Prometheus metrics exporter started");
    Ok(addr)
}
