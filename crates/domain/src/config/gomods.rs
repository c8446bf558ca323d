use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GoModsConfig {
    #[serde(default)]
    pub enable: bool,

    /// Module proxy requests are redirected to.
    #[serde(default = "default_upstream")]
    pub upstream: String,
}

impl Default for GoModsConfig {
    fn default() -> Self {
        Self {
            enable: false,
            upstream: default_upstream(),
        }
    }
}

fn default_upstream() -> String {
    "https://proxy.golang.org".to_string()
}
