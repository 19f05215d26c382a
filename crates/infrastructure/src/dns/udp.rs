use querylog_shipper_domain::DomainError;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::{debug, warn};

/// Maximum UDP DNS response size with EDNS(0)
const MAX_UDP_RESPONSE_SIZE: usize = 4096;

/// One-shot DNS exchange over UDP, one socket per query.
pub struct UdpExchange {
    server_addr: SocketAddr,
}

impl UdpExchange {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self { server_addr }
    }

    pub fn server_addr(&self) -> SocketAddr {
        self.server_addr
    }

    /// Send `message_bytes` and wait up to `timeout` for the reply.
    pub async fn exchange(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<Vec<u8>, DomainError> {
        let bind_addr: SocketAddr = if self.server_addr.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        };

        let socket = UdpSocket::bind(bind_addr).await.map_err(|e| {
            DomainError::IoError(format!("Failed to bind UDP socket: {}", e))
        })?;

        tokio::time::timeout(timeout, socket.send_to(message_bytes, self.server_addr))
            .await
            .map_err(|_| DomainError::QueryTimeout)?
            .map_err(|e| {
                DomainError::IoError(format!(
                    "Failed to send UDP query to {}: {}",
                    self.server_addr, e
                ))
            })?;

        let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];
        let (bytes_received, from_addr) =
            tokio::time::timeout(timeout, socket.recv_from(&mut recv_buf))
                .await
                .map_err(|_| DomainError::QueryTimeout)?
                .map_err(|e| {
                    DomainError::IoError(format!(
                        "Failed to receive UDP response from {}: {}",
                        self.server_addr, e
                    ))
                })?;

        if from_addr != self.server_addr {
            warn!(
                expected = %self.server_addr,
                received_from = %from_addr,
                "Discarding UDP response from unexpected source"
            );
            return Err(DomainError::InvalidResponse(format!(
                "response came from {} instead of {}",
                from_addr, self.server_addr
            )));
        }

        recv_buf.truncate(bytes_received);
        debug!(
            server = %self.server_addr,
            bytes_received,
            "UDP response received"
        );
        Ok(recv_buf)
    }
}
