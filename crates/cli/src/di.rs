use std::sync::Arc;
use tracing::info;
use txtdirect_application::use_cases::HandleRedirectUseCase;
use txtdirect_domain::{Config, RedirectType};
use txtdirect_infrastructure::{
    install_exporter, PrometheusMetrics, ReqwestProxyForwarder, WireTxtResolver,
};

/// Wires the redirect use case with the network-backed adapters.
pub fn build_redirect_use_case(config: Arc<Config>) -> anyhow::Result<HandleRedirectUseCase> {
    let resolver = WireTxtResolver::from_config(&config.dns)?;
    info!(
        resolver = %resolver.server(),
        timeout_ms = config.dns.query_timeout_ms,
        "TXT resolver ready"
    );

    let mut use_case = HandleRedirectUseCase::new(Arc::new(resolver), Arc::clone(&config));

    if config.redirect.is_enabled(&RedirectType::Proxy) {
        use_case = use_case.with_proxy(Arc::new(ReqwestProxyForwarder::new()?));
    }

    if config.metrics.enable {
        install_exporter(&config.metrics.address)?;
        use_case = use_case.with_metrics(Arc::new(PrometheusMetrics::new()));
    }

    Ok(use_case)
}
