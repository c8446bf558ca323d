use crate::ports::FallbackPolicy;
use crate::response_sink::{ResponseSink, STATUS_CODE_HEADER};
use tracing::{debug, info};
use txtdirect_domain::{Config, FallbackMode, RedirectRequest, ResolutionContext};

/// Fallback chain: record target, then the configured global URL, then 404.
pub struct DefaultFallback {
    global_url: Option<String>,
}

impl DefaultFallback {
    pub fn new(global_url: Option<String>) -> Self {
        Self { global_url }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.redirect.fallback.clone())
    }

    fn record_target<'a>(ctx: &'a ResolutionContext, mode: FallbackMode) -> Option<&'a str> {
        match mode {
            FallbackMode::To => ctx.last_to().map(|r| r.to.as_str()),
            FallbackMode::Website => ctx.last_website().map(|r| r.website.as_str()),
            FallbackMode::Global => None,
        }
    }
}

impl FallbackPolicy for DefaultFallback {
    fn fallback(
        &self,
        sink: &mut ResponseSink,
        request: &RedirectRequest,
        ctx: &ResolutionContext,
        mode: FallbackMode,
        code: u16,
    ) {
        if sink.is_committed() {
            debug!(host = %request.host, mode = %mode, "Response already written, fallback skipped");
            return;
        }

        if ctx.last().is_some_and(|r| r.referrer) {
            sink.set_header("Referer", &request.host);
        }

        let target = Self::record_target(ctx, mode).or(self.global_url.as_deref());

        match target {
            Some(target) => {
                info!(host = %request.host, mode = %mode, target = %target, code, "Fallback redirect");
                sink.set_header(STATUS_CODE_HEADER, &code.to_string());
                sink.redirect(target, code);
            }
            None => {
                info!(host = %request.host, mode = %mode, "No fallback target, answering 404");
                sink.set_header(STATUS_CODE_HEADER, "404");
                sink.not_found();
            }
        }
    }
}
