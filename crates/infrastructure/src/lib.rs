pub mod dns;
pub mod proxy;
pub mod system;
pub mod telemetry;

pub use dns::WireTxtResolver;
pub use proxy::ReqwestProxyForwarder;
pub use telemetry::{install_exporter, PrometheusMetrics};
