mod default_fallback;
mod go_meta_renderer;
mod go_proxy_redirector;
mod noop_metrics;
mod registry_redirector;

pub use default_fallback::DefaultFallback;
pub use go_meta_renderer::GoMetaRenderer;
pub use go_proxy_redirector::GoProxyRedirector;
pub use noop_metrics::NoopMetrics;
pub use registry_redirector::RegistryRedirector;
