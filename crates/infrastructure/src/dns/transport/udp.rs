//! UDP Transport for DNS queries (RFC 1035 §4.2.1)
//!
//! Messages are sent as-is (no framing) and replies are read into a buffer of
//! the configured maximum packet size. Every exchange binds its own socket.

use async_trait::async_trait;
use iterdns_application::ports::DnsTransport;
use iterdns_domain::DomainError;
use std::io;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::{debug, warn};

/// DNS over UDP transport
pub struct UdpTransport {
    max_packet_size: usize,
}

impl UdpTransport {
    pub fn new(max_packet_size: usize) -> Self {
        Self { max_packet_size }
    }
}

impl Default for UdpTransport {
    fn default() -> Self {
        Self::new(512)
    }
}

#[async_trait]
impl DnsTransport for UdpTransport {
    async fn send(
        &self,
        packet: &[u8],
        server: SocketAddr,
        timeout: Duration,
    ) -> Result<Vec<u8>, DomainError> {
        // Bind to ephemeral port (0 = OS assigns)
        let bind_addr = if server.is_ipv4() {
            SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0))
        } else {
            SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0))
        };

        let socket = UdpSocket::bind(bind_addr).await?;

        let bytes_sent = tokio::time::timeout(timeout, socket.send_to(packet, server))
            .await
            .map_err(|_| timeout_error(server))?
            .map_err(|e| io_error(e, server))?;

        debug!(server = %server, bytes_sent = bytes_sent, "UDP query sent");

        let mut recv_buf = vec![0u8; self.max_packet_size];

        let (bytes_received, from_addr) =
            tokio::time::timeout(timeout, socket.recv_from(&mut recv_buf))
                .await
                .map_err(|_| timeout_error(server))?
                .map_err(|e| io_error(e, server))?;

        if from_addr.ip() != server.ip() {
            warn!(
                expected = %server,
                received_from = %from_addr,
                "UDP response from unexpected source"
            );
        }

        recv_buf.truncate(bytes_received);
        validate_response_id(packet, &recv_buf, server)?;

        debug!(server = %server, bytes_received = bytes_received, "UDP response received");

        Ok(recv_buf)
    }
}

fn timeout_error(server: SocketAddr) -> DomainError {
    DomainError::TransportTimeout {
        server: server.to_string(),
    }
}

fn io_error(e: io::Error, server: SocketAddr) -> DomainError {
    if e.kind() == io::ErrorKind::ConnectionRefused {
        DomainError::TransportConnectionRefused {
            server: server.to_string(),
        }
    } else {
        DomainError::IoError(format!("{}: {}", server, e))
    }
}

/// Rejects a reply whose transaction ID differs from the query's.
pub(crate) fn validate_response_id(
    query: &[u8],
    response: &[u8],
    server: SocketAddr,
) -> Result<(), DomainError> {
    if query.len() < 2 || response.len() < 2 {
        return Err(DomainError::MalformedMessage(format!(
            "message from {} too short to carry an ID",
            server
        )));
    }

    let expected = u16::from_be_bytes([query[0], query[1]]);
    let received = u16::from_be_bytes([response[0], response[1]]);
    if expected != received {
        warn!(server = %server, expected, received, "DNS response ID mismatch");
        return Err(DomainError::ResponseIdMismatch { expected, received });
    }
    Ok(())
}

#[cfg(test)]
#[path = "udp_test.rs"]
mod tests;
