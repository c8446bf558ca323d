use super::upstream_resolver::UpstreamResolver;
use super::zone_resolver::ZoneResolver;
use crate::ports::{
    DockerV2Handler, FallbackPolicy, GoMetaHandler, GoModsHandler, MetricsRecorder,
    ProxyForwarder, TxtResolver,
};
use crate::response_sink::{ResponseSink, PERMANENT_REDIRECT_MAX_AGE, STATUS_CODE_HEADER};
use crate::services::{
    DefaultFallback, GoMetaRenderer, GoProxyRedirector, NoopMetrics, RegistryRedirector,
};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use txtdirect_domain::host::{is_ip_literal, strip_port};
use txtdirect_domain::{
    expand_placeholders, split_path, Config, DomainError, FallbackDirective, FallbackMode,
    Record, RedirectRequest, RedirectType, ResolutionContext,
};

/// Paths answered with 404 without any DNS lookup.
const BLACKLIST: [&str; 1] = ["/favicon.ico"];

const DOCKER_CLIENT_AGENT: &str = "Docker-Client";

pub struct HandleRedirectUseCase {
    zones: Arc<ZoneResolver>,
    upstream: UpstreamResolver,
    fallback: Arc<dyn FallbackPolicy>,
    proxy: Option<Arc<dyn ProxyForwarder>>,
    docker_v2: Arc<dyn DockerV2Handler>,
    go_meta: Arc<dyn GoMetaHandler>,
    go_mods: Arc<dyn GoModsHandler>,
    metrics: Arc<dyn MetricsRecorder>,
    config: Arc<Config>,
}

impl HandleRedirectUseCase {
    pub fn new(txt: Arc<dyn TxtResolver>, config: Arc<Config>) -> Self {
        let zones = Arc::new(ZoneResolver::new(txt, Arc::clone(&config)));
        Self {
            upstream: UpstreamResolver::new(Arc::clone(&zones)),
            zones,
            fallback: Arc::new(DefaultFallback::from_config(&config)),
            proxy: None,
            docker_v2: Arc::new(RegistryRedirector::new()),
            go_meta: Arc::new(GoMetaRenderer::new()),
            go_mods: Arc::new(GoProxyRedirector::from_config(&config.gomods)),
            metrics: Arc::new(NoopMetrics),
            config,
        }
    }

    pub fn with_fallback(mut self, fallback: Arc<dyn FallbackPolicy>) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn with_proxy(mut self, proxy: Arc<dyn ProxyForwarder>) -> Self {
        self.proxy = Some(proxy);
        self
    }

    pub fn with_docker_v2(mut self, handler: Arc<dyn DockerV2Handler>) -> Self {
        self.docker_v2 = handler;
        self
    }

    pub fn with_go_meta(mut self, handler: Arc<dyn GoMetaHandler>) -> Self {
        self.go_meta = handler;
        self
    }

    pub fn with_go_mods(mut self, handler: Arc<dyn GoModsHandler>) -> Self {
        self.go_mods = handler;
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<dyn MetricsRecorder>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Produces exactly one response for the request. Never fails: every
    /// error ends in a fallback.
    #[instrument(skip_all, fields(host = %request.host, path = %request.path))]
    pub async fn execute(&self, request: &RedirectRequest) -> ResponseSink {
        let mut sink = ResponseSink::new();
        sink.set_header("Server", "TXTDirect");
        let mut ctx = ResolutionContext::new();

        self.run(request, &mut ctx, &mut sink).await;

        if !sink.is_committed() {
            warn!(host = %request.host, "No response written, using global fallback");
            self.fall_back(&mut sink, request, &ctx, FallbackMode::Global, 302);
        }
        self.metrics
            .count_status(&request.host, sink.status().as_u16());
        sink
    }

    async fn run(
        &self,
        request: &RedirectRequest,
        ctx: &mut ResolutionContext,
        sink: &mut ResponseSink,
    ) {
        let host = request.host.as_ref();

        if BLACKLIST.contains(&request.path.as_str()) {
            info!(host = %host, path = %request.path, "Blacklisted path");
            sink.set_header(STATUS_CODE_HEADER, "404");
            sink.not_found();
            return;
        }

        if is_ip_literal(host) {
            info!(host = %host, "Request for an IP address, fallback triggered");
            self.fall_back(sink, request, ctx, FallbackMode::Global, 301);
            return;
        }

        let record = match self.resolve(host, request, ctx, sink).await {
            Ok(record) => record,
            Err(e) => {
                warn!(host = %host, error = %e, category = e.category().as_str(), "Could not resolve record");
                self.fall_back_on(sink, request, ctx, e.fallback());
                return;
            }
        };

        if !self.admit(&record, request, ctx, sink) {
            return;
        }

        let record = if record.redirect_type == Some(RedirectType::Path) {
            let Some(next) = self.follow_path(&record, request, ctx, sink).await else {
                return;
            };
            if !self.admit(&next, request, ctx, sink) {
                return;
            }
            next
        } else {
            record
        };

        self.dispatch(&record, request, ctx, sink).await;
    }

    async fn resolve(
        &self,
        host: &str,
        request: &RedirectRequest,
        ctx: &mut ResolutionContext,
        sink: &mut ResponseSink,
    ) -> Result<Record, DomainError> {
        let mut record = self.zones.resolve(host, request, ctx, sink).await?;
        self.upstream.resolve(&mut record, request, ctx, sink).await?;
        Ok(record)
    }

    /// Record-level guards shared by the first and the path-delegated record.
    fn admit(
        &self,
        record: &Record,
        request: &RedirectRequest,
        ctx: &ResolutionContext,
        sink: &mut ResponseSink,
    ) -> bool {
        if record.has_conflicting_aliases() {
            warn!(host = %request.host, "Both re= and from= are set, fallback triggered");
            self.fall_back(sink, request, ctx, FallbackMode::To, record.code);
            return false;
        }

        let redirect_type = record.redirect_type.clone().unwrap_or(RedirectType::Host);
        if redirect_type.is_supported() && !self.config.redirect.is_enabled(&redirect_type) {
            let e = DomainError::TypeDisabled(redirect_type.to_string());
            warn!(host = %request.host, error = %e, "Option disabled");
            self.fall_back_on(sink, request, ctx, e.fallback());
            return false;
        }
        true
    }

    /// Resolves the sub-zone a path record delegates to. `None` means a
    /// response was already written.
    async fn follow_path(
        &self,
        record: &Record,
        request: &RedirectRequest,
        ctx: &mut ResolutionContext,
        sink: &mut ResponseSink,
    ) -> Option<Record> {
        let host = request.host.as_ref();
        self.metrics.count_type(host, RedirectType::Path.as_str());
        self.metrics.count_path(host, &request.path);

        if request.path == "/" {
            if record.root.is_empty() {
                self.fall_back(sink, request, ctx, FallbackMode::To, record.code);
            } else {
                self.redirect(sink, request, record, &record.root);
            }
            return None;
        }

        let split = match split_path(&request.path, record) {
            Ok(split) => split,
            Err(e) => {
                warn!(host = %host, error = %e, "Could not derive zone from path");
                self.fall_back(sink, request, ctx, FallbackMode::To, record.code);
                return None;
            }
        };
        let sub_host = split.zone_for(strip_port(host));
        debug!(host = %host, zone = %sub_host, remainder = %split.remainder, "Path delegates to sub-zone");

        match self.resolve(&sub_host, request, ctx, sink).await {
            Ok(next) => Some(next),
            Err(e) if e.is_terminal() => {
                warn!(host = %host, zone = %sub_host, error = %e, "Could not parse delegated record");
                self.fall_back_on(sink, request, ctx, e.fallback());
                None
            }
            Err(e) => {
                warn!(host = %host, zone = %sub_host, error = %e, "Fallback is triggered because an error has occurred");
                self.fall_back(sink, request, ctx, FallbackMode::To, record.code);
                None
            }
        }
    }

    async fn dispatch(
        &self,
        record: &Record,
        request: &RedirectRequest,
        ctx: &ResolutionContext,
        sink: &mut ResponseSink,
    ) {
        let host = request.host.as_ref();
        let redirect_type = record.redirect_type.clone().unwrap_or(RedirectType::Host);
        self.metrics.count_type(host, redirect_type.as_str());

        match redirect_type {
            RedirectType::Host => match expand_placeholders(&record.to, request, &[]) {
                Ok(to) => self.redirect(sink, request, record, &to),
                Err(e) => {
                    warn!(host = %host, error = %e, "Fallback is triggered because an error has occurred");
                    self.fall_back(sink, request, ctx, FallbackMode::To, record.code);
                }
            },
            RedirectType::Path => {
                debug!(host = %host, "Path record reached after delegation, fallback triggered");
                self.fall_back(sink, request, ctx, FallbackMode::To, record.code);
            }
            RedirectType::Proxy => {
                let result = match &self.proxy {
                    Some(proxy) => proxy.forward(sink, request, record).await,
                    None => Err(DomainError::TypeHandler(
                        "no proxy forwarder configured".to_string(),
                    )),
                };
                if let Err(e) = result {
                    warn!(host = %host, target = %record.to, error = %e, "Proxy failed, fallback triggered");
                    self.fall_back(sink, request, ctx, FallbackMode::To, record.code);
                }
            }
            RedirectType::DockerV2 => {
                if !request.user_agent().contains(DOCKER_CLIENT_AGENT) {
                    info!(host = %host, "The request is not from docker client, fallback triggered");
                    self.fall_back(sink, request, ctx, FallbackMode::To, record.code);
                    return;
                }
                let upstream_zone = ctx.upstream_zone.as_deref();
                if let Err(e) = self
                    .docker_v2
                    .handle(sink, request, record, upstream_zone)
                    .await
                {
                    warn!(host = %host, error = %e, "Couldn't redirect to the requested container");
                    self.fall_back(sink, request, ctx, FallbackMode::To, record.code);
                }
            }
            RedirectType::GoMeta => {
                if request.query_param("go-get").as_deref() != Some("1") {
                    self.fall_back(sink, request, ctx, FallbackMode::Website, 302);
                    return;
                }
                if let Err(e) = self.go_meta.render(sink, record, host, &request.path) {
                    warn!(host = %host, error = %e, "Could not render go-import page");
                    self.fall_back(sink, request, ctx, FallbackMode::To, record.code);
                }
            }
            RedirectType::GoMods => {
                if let Err(e) = self.go_mods.handle(sink, request, &request.path).await {
                    warn!(host = %host, error = %e, "Module proxy redirect failed");
                    self.fall_back_on(sink, request, ctx, e.fallback());
                }
            }
            RedirectType::Unsupported(name) => {
                let e = DomainError::UnsupportedType(name);
                warn!(host = %host, error = %e, "Unsupported record type");
                self.fall_back_on(sink, request, ctx, e.fallback());
            }
        }
    }

    fn redirect(
        &self,
        sink: &mut ResponseSink,
        request: &RedirectRequest,
        record: &Record,
        target: &str,
    ) {
        info!(from = %format!("{}{}", request.host, request.path), target = %target, code = record.code, "Redirect");
        if record.code == 301 {
            sink.set_header(
                "Cache-Control",
                &format!("max-age={}", PERMANENT_REDIRECT_MAX_AGE),
            );
        }
        if record.referrer {
            sink.set_header("Referer", &request.host);
        }
        sink.set_header(STATUS_CODE_HEADER, &record.code.to_string());
        sink.redirect(target, record.code);
    }

    fn fall_back_on(
        &self,
        sink: &mut ResponseSink,
        request: &RedirectRequest,
        ctx: &ResolutionContext,
        directive: FallbackDirective,
    ) {
        self.fall_back(sink, request, ctx, directive.mode, directive.code);
    }

    fn fall_back(
        &self,
        sink: &mut ResponseSink,
        request: &RedirectRequest,
        ctx: &ResolutionContext,
        mode: FallbackMode,
        code: u16,
    ) {
        self.metrics.count_fallback(&request.host, mode);
        self.fallback.fallback(sink, request, ctx, mode, code);
    }
}
