use crate::response_sink::ResponseSink;
use async_trait::async_trait;
use txtdirect_domain::{DomainError, Record, RedirectRequest};

#[async_trait]
pub trait ProxyForwarder: Send + Sync {
    /// Forwards the request to the record's `to=` target and copies the
    /// upstream response into the sink.
    async fn forward(
        &self,
        sink: &mut ResponseSink,
        request: &RedirectRequest,
        record: &Record,
    ) -> Result<(), DomainError>;
}
