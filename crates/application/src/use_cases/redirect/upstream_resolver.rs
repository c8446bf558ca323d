use super::zone_resolver::ZoneResolver;
use crate::response_sink::ResponseSink;
use std::sync::Arc;
use tracing::{debug, warn};
use txtdirect_domain::host::strip_first_label;
use txtdirect_domain::{DomainError, Record, RedirectRequest, ResolutionContext};

/// Follows `use=` pointers: the first upstream zone that resolves replaces
/// the pointer record. Upstream records may not point further.
pub struct UpstreamResolver {
    zones: Arc<ZoneResolver>,
}

impl UpstreamResolver {
    pub fn new(zones: Arc<ZoneResolver>) -> Self {
        Self { zones }
    }

    pub async fn resolve(
        &self,
        record: &mut Record,
        request: &RedirectRequest,
        ctx: &mut ResolutionContext,
        sink: &mut ResponseSink,
    ) -> Result<(), DomainError> {
        if !record.is_upstream_pointer() {
            return Ok(());
        }

        let zones = record.use_zones.clone();
        for zone in &zones {
            match self.zones.resolve(zone, request, ctx, sink).await {
                Ok(upstream) if upstream.is_upstream_pointer() => {
                    warn!(zone = %zone, "Upstream record points to another upstream, skipped");
                }
                Ok(upstream) => {
                    debug!(zone = %zone, "Using upstream record");
                    ctx.upstream_zone = Some(strip_first_label(zone));
                    *record = upstream;
                    return Ok(());
                }
                Err(e) if e.is_terminal() => {
                    warn!(zone = %zone, error = %e, "Upstream record rejected");
                    return Err(e);
                }
                Err(e) => {
                    debug!(zone = %zone, error = %e, "Upstream zone did not resolve");
                }
            }
        }

        Err(DomainError::UpstreamExhausted)
    }
}
