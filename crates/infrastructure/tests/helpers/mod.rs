use doh_relay_application::ports::UpstreamReply;
use doh_relay_domain::DomainError;
use futures::StreamExt;

mod dns_server_mock;
mod doh_server_mock;

pub use dns_server_mock::MockDnsServer;
pub use doh_server_mock::{MockDohServer, RecordedRequest};

/// Drains a streamed reply body.
pub async fn collect_body(reply: UpstreamReply) -> Result<Vec<u8>, DomainError> {
    let mut body = reply.body;
    let mut collected = Vec::new();
    while let Some(chunk) = body.next().await {
        collected.extend_from_slice(&chunk?);
    }
    Ok(collected)
}
