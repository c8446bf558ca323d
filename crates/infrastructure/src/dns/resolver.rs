use crate::dns::forwarding::{MessageBuilder, ResponseParser, TxtResponse};
use crate::dns::transport::{DnsTransport, TcpTransport, TransportError, UdpTransport};
use crate::system::system_nameserver;
use async_trait::async_trait;
use hickory_proto::op::ResponseCode;
use std::net::SocketAddr;
use std::time::Duration;
use tracing::{debug, instrument};
use txtdirect_application::ports::TxtResolver;
use txtdirect_domain::config::DnsConfig;
use txtdirect_domain::{ConfigError, DomainError};

/// TXT lookups against a single recursive nameserver.
///
/// Queries go over UDP first and are retried over TCP when the answer is
/// truncated. Nothing is cached.
pub struct WireTxtResolver {
    server: SocketAddr,
    timeout: Duration,
}

impl WireTxtResolver {
    pub fn new(server: SocketAddr, timeout: Duration) -> Self {
        Self { server, timeout }
    }

    /// Uses `dns.resolver` when set, the first system nameserver otherwise.
    pub fn from_config(config: &DnsConfig) -> Result<Self, ConfigError> {
        let server = match &config.resolver {
            Some(addr) => addr.parse::<SocketAddr>().map_err(|e| {
                ConfigError::Validation(format!("Invalid dns.resolver '{}': {}", addr, e))
            })?,
            None => system_nameserver(),
        };
        Ok(Self::new(server, Duration::from_millis(config.query_timeout_ms)))
    }

    pub fn server(&self) -> SocketAddr {
        self.server
    }

    async fn exchange(
        &self,
        zone: &str,
        transport: &dyn DnsTransport,
        id: u16,
        query: &[u8],
    ) -> Result<TxtResponse, DomainError> {
        let raw = transport
            .send(query, self.timeout)
            .await
            .map_err(|e| transport_error(zone, e))?;

        let response = ResponseParser::parse(zone, &raw.bytes)?;
        if response.id != id {
            return Err(DomainError::DnsQuery {
                zone: zone.to_string(),
                reason: format!(
                    "{} response ID {} does not match query ID {}",
                    raw.protocol_used, response.id, id
                ),
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl TxtResolver for WireTxtResolver {
    #[instrument(skip(self), fields(server = %self.server))]
    async fn lookup_txt(&self, zone: &str) -> Result<Vec<String>, DomainError> {
        let (id, query) = MessageBuilder::build_txt_query(zone)?;

        let mut response = self
            .exchange(zone, &UdpTransport::new(self.server), id, &query)
            .await?;

        if response.truncated {
            debug!(zone = %zone, "Truncated UDP response, retrying over TCP");
            response = self
                .exchange(zone, &TcpTransport::new(self.server), id, &query)
                .await?;
        }

        if response.is_nxdomain() {
            return Err(DomainError::DnsQuery {
                zone: zone.to_string(),
                reason: "NXDOMAIN".to_string(),
            });
        }
        if response.rcode != ResponseCode::NoError {
            return Err(DomainError::DnsQuery {
                zone: zone.to_string(),
                reason: format!("server answered {}", response.rcode),
            });
        }

        Ok(response.answers)
    }
}

fn transport_error(zone: &str, e: TransportError) -> DomainError {
    DomainError::DnsQuery {
        zone: zone.to_string(),
        reason: e.to_string(),
    }
}
