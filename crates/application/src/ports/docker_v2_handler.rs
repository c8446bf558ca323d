use crate::response_sink::ResponseSink;
use async_trait::async_trait;
use txtdirect_domain::{DomainError, Record, RedirectRequest};

#[async_trait]
pub trait DockerV2Handler: Send + Sync {
    /// `upstream_zone` is the suffix recorded after `use=` indirection.
    async fn handle(
        &self,
        sink: &mut ResponseSink,
        request: &RedirectRequest,
        record: &Record,
        upstream_zone: Option<&str>,
    ) -> Result<(), DomainError>;
}
