pub mod tcp;
pub mod udp;

use async_trait::async_trait;
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

pub use tcp::TcpTransport;
pub use udp::UdpTransport;

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Timeout {action} {server}")]
    Timeout {
        action: &'static str,
        server: SocketAddr,
    },

    #[error("Failed {action} {server}: {source}")]
    Io {
        action: &'static str,
        server: SocketAddr,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug)]
pub struct TransportResponse {
    pub bytes: Vec<u8>,

    pub protocol_used: &'static str,
}

#[async_trait]
pub trait DnsTransport: Send + Sync {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, TransportError>;

    fn protocol_name(&self) -> &'static str;
}
