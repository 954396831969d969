use async_trait::async_trait;
use bytes::Bytes;
use doh_relay_domain::{DnsMessage, DomainError};
use std::net::IpAddr;

#[async_trait]
pub trait Do53Forwarder: Send + Sync {
    /// Sends `message` as one UDP datagram to `address` port 53 and returns
    /// the single reply datagram.
    async fn forward(&self, message: &DnsMessage, address: IpAddr) -> Result<Bytes, DomainError>;
}
