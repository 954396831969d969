use async_trait::async_trait;
use bytes::Bytes;
use doh_relay_domain::{DnsMessage, DomainError};
use futures::stream::{self, BoxStream, StreamExt};

pub type ReplyStream = BoxStream<'static, Result<Bytes, DomainError>>;

#[derive(Debug, Clone)]
pub struct DohQuery {
    pub host: String,
    pub path: String,
    pub message: DnsMessage,
    /// Caller's `x-forwarded-for`, when passthrough is enabled.
    pub forwarded_for: Option<String>,
}

/// Reply relayed back to the HTTP caller.
pub struct UpstreamReply {
    pub status: u16,
    /// Upstream headers to relay. Empty unless header relaying is enabled.
    pub headers: Vec<(String, String)>,
    pub body: ReplyStream,
}

impl UpstreamReply {
    /// A completed Do53 round trip: status 200 and the reply datagram.
    pub fn datagram(bytes: Bytes) -> Self {
        Self {
            status: 200,
            headers: Vec::new(),
            body: stream::once(async move { Ok(bytes) }).boxed(),
        }
    }
}

impl std::fmt::Debug for UpstreamReply {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamReply")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

#[async_trait]
pub trait DohForwarder: Send + Sync {
    /// POSTs the message to `https://{host}/{path}`; the reply body streams.
    async fn forward(&self, query: DohQuery) -> Result<UpstreamReply, DomainError>;
}
