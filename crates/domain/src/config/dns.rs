use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DnsConfig {
    /// Custom resolver as `ip:port`; the system resolver is used when unset.
    #[serde(default)]
    pub resolver: Option<String>,

    #[serde(default = "default_query_timeout_ms")]
    pub query_timeout_ms: u64,
}

impl Default for DnsConfig {
    fn default() -> Self {
        Self {
            resolver: None,
            query_timeout_ms: default_query_timeout_ms(),
        }
    }
}

fn default_query_timeout_ms() -> u64 {
    2000
}
