use crate::response_sink::ResponseSink;
use txtdirect_domain::{DomainError, Record};

pub trait GoMetaHandler: Send + Sync {
    fn render(
        &self,
        sink: &mut ResponseSink,
        record: &Record,
        host: &str,
        path: &str,
    ) -> Result<(), DomainError>;
}
