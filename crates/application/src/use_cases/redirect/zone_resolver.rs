use crate::ports::TxtResolver;
use crate::response_sink::ResponseSink;
use std::sync::Arc;
use tracing::{debug, warn};
use txtdirect_domain::host::{absolute_zone, apex_wildcard_zone, wildcard_zone};
use txtdirect_domain::{
    parse_record, Config, DomainError, Record, RedirectRequest, ResolutionContext,
};

/// Finds and parses the record governing a host.
///
/// Lookup order, first hit wins:
/// 1. `_redirect.<host>.`
/// 2. `_redirect._.<host>.`, only while no record was resolved for the request
/// 3. `_redirect._.<host without its leftmost label>.`
pub struct ZoneResolver {
    txt: Arc<dyn TxtResolver>,
    config: Arc<Config>,
}

enum Stage {
    Found(Vec<String>),
    Missed,
}

impl ZoneResolver {
    pub fn new(txt: Arc<dyn TxtResolver>, config: Arc<Config>) -> Self {
        Self { txt, config }
    }

    async fn query(&self, zone: &str) -> Stage {
        match self.txt.lookup_txt(zone).await {
            Ok(answers) if answers.is_empty() => {
                debug!(zone = %zone, "No TXT answers");
                Stage::Missed
            }
            Ok(answers) if answers.len() == 1 && answers[0].is_empty() => {
                debug!(zone = %zone, "Empty TXT answer");
                Stage::Missed
            }
            Ok(answers) => Stage::Found(answers),
            Err(e) => {
                debug!(zone = %zone, error = %e, "TXT lookup failed");
                Stage::Missed
            }
        }
    }

    /// Resolves `host` (a request host or a `_redirect.` zone) to a record.
    ///
    /// The record is appended to `ctx` and its `>Header` directives are set
    /// on `sink` before returning.
    pub async fn resolve(
        &self,
        host: &str,
        request: &RedirectRequest,
        ctx: &mut ResolutionContext,
        sink: &mut ResponseSink,
    ) -> Result<Record, DomainError> {
        let mut zone = absolute_zone(host);
        let mut stage = self.query(&zone).await;

        if matches!(stage, Stage::Missed) && !ctx.has_records() {
            zone = apex_wildcard_zone(host);
            stage = self.query(&zone).await;
        }

        let (zone, answers) = match stage {
            Stage::Found(answers) => (zone, answers),
            Stage::Missed => {
                let wildcard = wildcard_zone(host);
                match self.query(&wildcard).await {
                    Stage::Found(answers) => (wildcard, answers),
                    Stage::Missed => {
                        warn!(host = %host, zone = %wildcard, "Wildcard TXT lookup failed");
                        return Err(DomainError::ResolutionExhausted(host.to_string()));
                    }
                }
            }
        };

        let [text] = answers.as_slice() else {
            return Err(DomainError::AmbiguousRecord {
                zone,
                count: answers.len(),
            });
        };

        let record = parse_record(text, request, &self.config.redirect.enable).map_err(|e| {
            warn!(zone = %zone, error = %e, "Could not parse TXT record");
            e
        })?;

        for (name, value) in &record.headers {
            sink.set_header(name, value);
        }
        debug!(zone = %zone, record_type = %record.type_name(), "Resolved record");
        ctx.push(record.clone());

        Ok(record)
    }
}
