//! Opaque DNS wire-format message as carried by RFC 8484.
//!
//! The relay never looks inside the message. It only moves the bytes between
//! the HTTP caller and the upstream resolver.

use crate::DomainError;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use bytes::Bytes;

/// Media type of a DNS message body (RFC 8484 §6).
pub const DNS_MESSAGE_CONTENT_TYPE: &str = "application/dns-message";

/// Largest message a DNS transport can carry.
pub const MAX_DNS_MESSAGE_SIZE: usize = 65_535;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DnsMessage(Bytes);

impl DnsMessage {
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self(bytes.into())
    }

    /// Decodes the `dns` query parameter: base64url without padding.
    pub fn from_base64url(encoded: &str) -> Result<Self, DomainError> {
        URL_SAFE_NO_PAD
            .decode(encoded)
            .map(Self::new)
            .map_err(|e| DomainError::InvalidDnsMessageEncoding(e.to_string()))
    }

    pub fn to_base64url(&self) -> String {
        URL_SAFE_NO_PAD.encode(&self.0)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn bytes(&self) -> Bytes {
        self.0.clone()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for DnsMessage {
    fn from(value: Vec<u8>) -> Self {
        Self::new(value)
    }
}

impl From<Bytes> for DnsMessage {
    fn from(value: Bytes) -> Self {
        Self(value)
    }
}

/// True when a `Content-Type` value names the DNS message media type.
/// Parameters such as `; charset=...` are ignored.
pub fn is_dns_message_content_type(value: &str) -> bool {
    value
        .split(';')
        .next()
        .map(|media| media.trim().eq_ignore_ascii_case(DNS_MESSAGE_CONTENT_TYPE))
        .unwrap_or(false)
}
