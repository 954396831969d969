//! UDP Transport for Do53 upstreams (RFC 1035 §4.2.1)
//!
//! One datagram out, one datagram in. The socket is created per query and
//! connected to the upstream, so replies from any other source are dropped by
//! the kernel. There is no retransmission and no TCP fallback on truncation;
//! a truncated reply is relayed as-is.

use async_trait::async_trait;
use bytes::Bytes;
use doh_relay_application::ports::Do53Forwarder;
use doh_relay_domain::upstream_target::DO53_PORT;
use doh_relay_domain::{DnsMessage, DomainError};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::debug;

/// Largest datagram a UDP socket can deliver.
const MAX_UDP_RESPONSE_SIZE: usize = 65_535;

/// DNS over UDP forwarder
pub struct UdpForwarder {
    timeout: Duration,
    port: u16,
}

impl UdpForwarder {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            port: DO53_PORT,
        }
    }

    /// Targets a port other than 53, e.g. a loopback mock resolver.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    fn bind_addr(server_addr: &SocketAddr) -> SocketAddr {
        if server_addr.is_ipv4() {
            SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0))
        } else {
            SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0))
        }
    }
}

#[async_trait]
impl Do53Forwarder for UdpForwarder {
    async fn forward(&self, message: &DnsMessage, address: IpAddr) -> Result<Bytes, DomainError> {
        let server_addr = SocketAddr::new(address, self.port);
        let server = server_addr.to_string();

        let socket = UdpSocket::bind(Self::bind_addr(&server_addr))
            .await
            .map_err(|e| DomainError::from_io(server.as_str(), &e))?;

        socket
            .connect(server_addr)
            .await
            .map_err(|e| DomainError::from_io(server.as_str(), &e))?;

        let bytes_sent = tokio::time::timeout(self.timeout, socket.send(message.as_bytes()))
            .await
            .map_err(|_| DomainError::TransportTimeout {
                server: server.clone(),
            })?
            .map_err(|e| DomainError::from_io(server.as_str(), &e))?;

        debug!(server = %server_addr, bytes_sent, "UDP query sent");

        let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];

        let bytes_received = tokio::time::timeout(self.timeout, socket.recv(&mut recv_buf))
            .await
            .map_err(|_| DomainError::TransportTimeout {
                server: server.clone(),
            })?
            .map_err(|e| DomainError::from_io(server.as_str(), &e))?;

        recv_buf.truncate(bytes_received);

        debug!(server = %server_addr, bytes_received, "UDP response received");

        Ok(Bytes::from(recv_buf))
    }
}
