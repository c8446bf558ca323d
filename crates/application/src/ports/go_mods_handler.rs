use crate::response_sink::ResponseSink;
use async_trait::async_trait;
use txtdirect_domain::{DomainError, RedirectRequest};

#[async_trait]
pub trait GoModsHandler: Send + Sync {
    async fn handle(
        &self,
        sink: &mut ResponseSink,
        request: &RedirectRequest,
        path: &str,
    ) -> Result<(), DomainError>;
}
