use crate::response_sink::ResponseSink;
use txtdirect_domain::{FallbackMode, RedirectRequest, ResolutionContext};

pub trait FallbackPolicy: Send + Sync {
    /// Writes the fallback response unless the sink is already committed.
    fn fallback(
        &self,
        sink: &mut ResponseSink,
        request: &RedirectRequest,
        ctx: &ResolutionContext,
        mode: FallbackMode,
        code: u16,
    );
}
