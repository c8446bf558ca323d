//! UDP transport for DNS queries (RFC 1035 §4.2.1)
//!
//! Messages are sent as-is, without framing. A response with the TC bit set
//! must be retried over TCP by the caller.

use super::{DnsTransport, TransportError, TransportResponse};
use async_trait::async_trait;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::{debug, warn};

const MAX_UDP_RESPONSE_SIZE: usize = 4096;

pub struct UdpTransport {
    server_addr: SocketAddr,
}

impl UdpTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self { server_addr }
    }

    fn bind_addr(&self) -> SocketAddr {
        if self.server_addr.is_ipv4() {
            SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0))
        } else {
            SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0))
        }
    }
}

#[async_trait]
impl DnsTransport for UdpTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, TransportError> {
        let server = self.server_addr;
        let socket = UdpSocket::bind(self.bind_addr())
            .await
            .map_err(|source| TransportError::Io {
                action: "binding UDP socket for",
                server,
                source,
            })?;

        let bytes_sent = tokio::time::timeout(timeout, socket.send_to(message_bytes, server))
            .await
            .map_err(|_| TransportError::Timeout {
                action: "sending UDP query to",
                server,
            })?
            .map_err(|source| TransportError::Io {
                action: "sending UDP query to",
                server,
                source,
            })?;

        debug!(server = %server, bytes_sent = bytes_sent, "UDP query sent");

        let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];

        let (bytes_received, from_addr) =
            tokio::time::timeout(timeout, socket.recv_from(&mut recv_buf))
                .await
                .map_err(|_| TransportError::Timeout {
                    action: "waiting for UDP response from",
                    server,
                })?
                .map_err(|source| TransportError::Io {
                    action: "receiving UDP response from",
                    server,
                    source,
                })?;

        if from_addr.ip() != server.ip() {
            warn!(
                expected = %server,
                received_from = %from_addr,
                "UDP response from unexpected source"
            );
        }

        recv_buf.truncate(bytes_received);

        debug!(server = %server, bytes_received = bytes_received, "UDP response received");

        Ok(TransportResponse {
            bytes: recv_buf,
            protocol_used: "UDP",
        })
    }

    fn protocol_name(&self) -> &'static str {
        "UDP"
    }
}
