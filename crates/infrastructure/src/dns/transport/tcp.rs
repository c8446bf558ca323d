//! TCP transport for DNS queries (RFC 1035 §4.2.2)
//!
//! Every message is framed with a 2-byte big-endian length prefix.

use super::{DnsTransport, TransportError, TransportResponse};
use async_trait::async_trait;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::debug;

pub struct TcpTransport {
    server_addr: SocketAddr,
}

impl TcpTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self { server_addr }
    }

    async fn connect(&self, timeout: Duration) -> Result<TcpStream, TransportError> {
        let server = self.server_addr;
        let stream = tokio::time::timeout(timeout, TcpStream::connect(server))
            .await
            .map_err(|_| TransportError::Timeout {
                action: "connecting to TCP server",
                server,
            })?
            .map_err(|source| TransportError::Io {
                action: "connecting to TCP server",
                server,
                source,
            })?;

        stream
            .set_nodelay(true)
            .map_err(|source| TransportError::Io {
                action: "setting TCP_NODELAY on",
                server,
                source,
            })?;

        Ok(stream)
    }
}

#[async_trait]
impl DnsTransport for TcpTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, TransportError> {
        let server = self.server_addr;
        let mut stream = self.connect(timeout).await?;

        tokio::time::timeout(timeout, send_with_length_prefix(&mut stream, message_bytes))
            .await
            .map_err(|_| TransportError::Timeout {
                action: "sending TCP query to",
                server,
            })?
            .map_err(|source| TransportError::Io {
                action: "sending TCP query to",
                server,
                source,
            })?;

        debug!(server = %server, message_len = message_bytes.len(), "TCP query sent");

        let response_bytes = tokio::time::timeout(timeout, read_with_length_prefix(&mut stream))
            .await
            .map_err(|_| TransportError::Timeout {
                action: "waiting for TCP response from",
                server,
            })?
            .map_err(|source| TransportError::Io {
                action: "reading TCP response from",
                server,
                source,
            })?;

        debug!(server = %server, response_len = response_bytes.len(), "TCP response received");

        Ok(TransportResponse {
            bytes: response_bytes,
            protocol_used: "TCP",
        })
    }

    fn protocol_name(&self) -> &'static str {
        "TCP"
    }
}

pub(crate) async fn send_with_length_prefix<S>(stream: &mut S, message: &[u8]) -> std::io::Result<()>
where
    S: AsyncWriteExt + Unpin,
{
    let len = u16::try_from(message.len()).map_err(|_| {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, "DNS message too large")
    })?;
    let mut framed = Vec::with_capacity(2 + message.len());
    framed.extend_from_slice(&len.to_be_bytes());
    framed.extend_from_slice(message);
    stream.write_all(&framed).await?;
    stream.flush().await
}

pub(crate) async fn read_with_length_prefix<S>(stream: &mut S) -> std::io::Result<Vec<u8>>
where
    S: AsyncReadExt + Unpin,
{
    let mut len_buf = [0u8; 2];
    stream.read_exact(&mut len_buf).await?;
    let len = u16::from_be_bytes(len_buf) as usize;

    let mut buf = vec![0u8; len];
    stream.read_exact(&mut buf).await?;
    Ok(buf)
}
