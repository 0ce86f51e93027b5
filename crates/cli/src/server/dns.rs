use iterdns_infrastructure::dns::DnsServerHandler;
use std::io;
use std::net::SocketAddr;
use tokio::net::UdpSocket;
use tracing::{error, info, warn};

const RECV_BUFFER_SIZE: usize = 512;

/// Serves client queries one at a time until the process is killed.
pub async fn start_dns_server(bind_addr: String, handler: DnsServerHandler) -> anyhow::Result<()> {
    let socket_addr: SocketAddr = bind_addr.parse()?;
    let socket = UdpSocket::bind(socket_addr).await?;

    info!(bind_address = %socket.local_addr()?, "DNS server ready");

    let mut recv_buf = [0u8; RECV_BUFFER_SIZE];

    loop {
        let (n, from) = match socket.recv_from(&mut recv_buf).await {
            Ok(received) => received,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                error!(error = %e, "UDP recv error");
                continue;
            }
        };

        let Some(response) = handler.handle_packet(&recv_buf[..n], from).await else {
            continue;
        };

        if let Err(e) = socket.send_to(&response, from).await {
            warn!(client = %from, error = %e, "Failed to send response");
        }
    }
}
