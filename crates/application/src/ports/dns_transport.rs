use async_trait::async_trait;
use iterdns_domain::DomainError;
use std::net::SocketAddr;
use std::time::Duration;

/// One datagram exchange with a nameserver.
#[async_trait]
pub trait DnsTransport: Send + Sync {
    /// Sends `packet` to `server` and waits at most `timeout` for the reply.
    /// Every attempt uses its own socket.
    async fn send(
        &self,
        packet: &[u8],
        server: SocketAddr,
        timeout: Duration,
    ) -> Result<Vec<u8>, DomainError>;
}
