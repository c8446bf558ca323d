use async_trait::async_trait;
use txtdirect_domain::DomainError;

#[async_trait]
pub trait TxtResolver: Send + Sync {
    /// Every TXT answer published at an absolute zone name.
    ///
    /// Each element is one resource record with its character-strings
    /// concatenated. An empty vector means the zone exists but carries no TXT.
    async fn lookup_txt(&self, zone: &str) -> Result<Vec<String>, DomainError>;
}
