use txtdirect_domain::FallbackMode;

/// Request counters. Implementations must never fail or block.
pub trait MetricsRecorder: Send + Sync {
    fn count_type(&self, host: &str, redirect_type: &str);

    fn count_status(&self, host: &str, status: u16);

    fn count_path(&self, host: &str, path: &str);

    fn count_fallback(&self, host: &str, mode: FallbackMode);
}
