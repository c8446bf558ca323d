pub mod dns;
pub mod errors;
pub mod gomods;
pub mod logging;
pub mod metrics;
pub mod redirect;
pub mod root;
pub mod server;

pub use dns::DnsConfig;
pub use errors::ConfigError;
pub use gomods::GoModsConfig;
pub use logging::LoggingConfig;
pub use metrics::MetricsConfig;
pub use redirect::RedirectConfig;
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
