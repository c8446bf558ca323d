use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MetricsConfig {
    #[serde(default)]
    pub enable: bool,

    /// Listen address of the Prometheus scrape endpoint.
    #[serde(default = "default_address")]
    pub address: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enable: false,
            address: default_address(),
        }
    }
}

fn default_address() -> String {
    "0.0.0.0:9100".to_string()
}
