use super::ResolveUpstreamUseCase;
use crate::ports::{Do53Forwarder, DohForwarder, DohQuery, UpstreamReply};
use doh_relay_domain::{DnsMessage, DomainError, ResolvedUpstream, Selector, UpstreamTarget};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, warn};

/// One inbound DoH request after HTTP decoding.
#[derive(Debug, Clone, Default)]
pub struct RelayRequest {
    pub selector: Selector,
    /// `None` when the request carried no DNS message at all.
    pub message: Option<DnsMessage>,
    pub forwarded_for: Option<String>,
}

#[derive(Debug)]
pub struct RelayOutcome {
    pub upstream: ResolvedUpstream,
    pub reply: UpstreamReply,
}

pub struct RelayDnsQueryUseCase {
    resolver: Arc<ResolveUpstreamUseCase>,
    do53: Arc<dyn Do53Forwarder>,
    doh: Arc<dyn DohForwarder>,
}

impl RelayDnsQueryUseCase {
    pub fn new(
        resolver: Arc<ResolveUpstreamUseCase>,
        do53: Arc<dyn Do53Forwarder>,
        doh: Arc<dyn DohForwarder>,
    ) -> Self {
        Self { resolver, do53, doh }
    }

    pub async fn execute(&self, request: RelayRequest) -> Result<RelayOutcome, DomainError> {
        let start = Instant::now();
        let upstream = self.resolver.execute(&request.selector);

        let Some(message) = request.message else {
            warn!(
                selector = %request.selector,
                target = %upstream.target,
                "Request carries no DNS message"
            );
            return Err(DomainError::MissingDnsMessage);
        };

        let message_len = message.len();
        let result = match &upstream.target {
            UpstreamTarget::Do53 { address } => self
                .do53
                .forward(&message, *address)
                .await
                .map(UpstreamReply::datagram),
            UpstreamTarget::DoH { host, path } => {
                self.doh
                    .forward(DohQuery {
                        host: host.to_string(),
                        path: path.to_string(),
                        message,
                        forwarded_for: request.forwarded_for,
                    })
                    .await
            }
        };

        match result {
            Ok(reply) => {
                debug!(
                    selector = %request.selector,
                    target = %upstream.target,
                    protocol = upstream.target.protocol_name(),
                    message_len,
                    status = reply.status,
                    elapsed_us = start.elapsed().as_micros() as u64,
                    "DNS message relayed"
                );
                Ok(RelayOutcome { upstream, reply })
            }
            Err(e) => {
                error!(
                    selector = %request.selector,
                    target = %upstream.target,
                    protocol = upstream.target.protocol_name(),
                    error = %e,
                    "Upstream relay failed"
                );
                Err(e)
            }
        }
    }
}
