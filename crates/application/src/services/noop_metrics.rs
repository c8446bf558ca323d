use crate::ports::MetricsRecorder;
use txtdirect_domain::FallbackMode;

/// Recorder used when metrics are disabled.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopMetrics;

impl MetricsRecorder for NoopMetrics {
    fn count_type(&self, _host: &str, _redirect_type: &str) {}

    fn count_status(&self, _host: &str, _status: u16) {}

    fn count_path(&self, _host: &str, _path: &str) {}

    fn count_fallback(&self, _host: &str, _mode: FallbackMode) {}
}
