mod docker_v2_handler;
mod fallback_policy;
mod go_meta_handler;
mod go_mods_handler;
mod metrics_recorder;
mod proxy_forwarder;
mod txt_resolver;

pub use docker_v2_handler::DockerV2Handler;
pub use fallback_policy::FallbackPolicy;
pub use go_meta_handler::GoMetaHandler;
pub use go_mods_handler::GoModsHandler;
pub use metrics_recorder::MetricsRecorder;
pub use proxy_forwarder::ProxyForwarder;
pub use txt_resolver::TxtResolver;

// Re-export for convenience
pub use txtdirect_domain::{RedirectRequest, ResolutionContext};
