use serde::{Deserialize, Serialize};

use crate::record::RedirectType;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RedirectConfig {
    /// Redirect types a record may select with `type=`.
    #[serde(default = "default_enable")]
    pub enable: Vec<RedirectType>,

    /// Global fallback URL; without it fallbacks answer 404.
    #[serde(default)]
    pub fallback: Option<String>,
}

impl RedirectConfig {
    pub fn is_enabled(&self, redirect_type: &RedirectType) -> bool {
        self.enable.contains(redirect_type)
    }
}

impl Default for RedirectConfig {
    fn default() -> Self {
        Self {
            enable: default_enable(),
            fallback: None,
        }
    }
}

fn default_enable() -> Vec<RedirectType> {
    vec![RedirectType::Host, RedirectType::Path, RedirectType::GoMeta]
}
