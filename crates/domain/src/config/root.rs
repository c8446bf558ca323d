use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use url::Url;

use super::dns::DnsConfig;
use super::errors::ConfigError;
use super::gomods::GoModsConfig;
use super::logging::LoggingConfig;
use super::metrics::MetricsConfig;
use super::redirect::RedirectConfig;
use super::server::ServerConfig;

const LOCAL_CONFIG_PATH: &str = "txtdirect.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/txtdirect/config.toml";

/// Main configuration structure for TXTDirect
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// HTTP listener
    #[serde(default)]
    pub server: ServerConfig,

    /// Enabled redirect types and the global fallback
    #[serde(default)]
    pub redirect: RedirectConfig,

    /// TXT lookups
    #[serde(default)]
    pub dns: DnsConfig,

    #[serde(default)]
    pub gomods: GoModsConfig,

    #[serde(default)]
    pub metrics: MetricsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. txtdirect.toml in current directory
    /// 3. /etc/txtdirect/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::get_config_path() {
                Some(found) => Self::from_file(&found)?,
                None => Self::default(),
            },
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    /// Parse configuration from a TOML document
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(resolver) = overrides.resolver {
            self.dns.resolver = Some(resolver);
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "HTTP port cannot be 0".to_string(),
            ));
        }

        if let Some(unknown) = self.redirect.enable.iter().find(|t| !t.is_supported()) {
            return Err(ConfigError::Validation(format!(
                "Unknown redirect type '{}' in redirect.enable",
                unknown
            )));
        }

        if let Some(fallback) = &self.redirect.fallback {
            Url::parse(fallback).map_err(|e| {
                ConfigError::Validation(format!("Invalid fallback URL '{}': {}", fallback, e))
            })?;
        }

        if let Some(resolver) = &self.dns.resolver {
            resolver.parse::<SocketAddr>().map_err(|e| {
                ConfigError::Validation(format!("Invalid resolver address '{}': {}", resolver, e))
            })?;
        }

        if self.dns.query_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "DNS query timeout cannot be 0".to_string(),
            ));
        }

        if self.gomods.enable {
            Url::parse(&self.gomods.upstream).map_err(|e| {
                ConfigError::Validation(format!(
                    "Invalid gomods upstream '{}': {}",
                    self.gomods.upstream, e
                ))
            })?;
        }

        if self.metrics.enable {
            self.metrics.address.parse::<SocketAddr>().map_err(|e| {
                ConfigError::Validation(format!(
                    "Invalid metrics address '{}': {}",
                    self.metrics.address, e
                ))
            })?;
        }

        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: &str) -> Result<(), ConfigError> {
        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, toml_string)
            .map_err(|e| ConfigError::FileWrite(path.to_string(), e.to_string()))?;
        Ok(())
    }

    /// Get the path to the configuration file being used
    pub fn get_config_path() -> Option<String> {
        [LOCAL_CONFIG_PATH, SYSTEM_CONFIG_PATH]
            .into_iter()
            .find(|p| std::path::Path::new(p).exists())
            .map(str::to_string)
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub port: Option<u16>,
    pub bind_address: Option<String>,
    pub resolver: Option<String>,
    pub log_level: Option<String>,
}
