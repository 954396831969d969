//! HTTPS Transport for DoH upstreams (RFC 8484)
//!
//! Relays the caller's DNS message as an HTTP POST with `application/dns-message`
//! content type. The upstream status is kept and the body is streamed back
//! chunk by chunk, so nothing is buffered. Dropping the reply stream aborts the
//! upstream request.
//!
//! Wire format (HTTP):
//! ```text
//! POST /{path} HTTP/2
//! Host: {host}
//! Content-Type: application/dns-message
//! Accept: application/dns-message
//! X-Forwarded-For: <caller's header, when enabled>
//!
//! <raw DNS message bytes>
//! ```

use async_trait::async_trait;
use doh_relay_application::ports::{DohForwarder, DohQuery, UpstreamReply};
use doh_relay_domain::{DomainError, DNS_MESSAGE_CONTENT_TYPE};
use futures::StreamExt;
use reqwest::header::{HeaderMap, HeaderName, ACCEPT, CONTENT_TYPE};
use std::time::Duration;
use tracing::debug;

pub const X_FORWARDED_FOR: &str = "x-forwarded-for";

/// Response headers never relayed: framing and connection management belong to
/// each hop, and the content type is always set by the relay itself.
const SKIPPED_RESPONSE_HEADERS: &[&str] = &[
    "transfer-encoding",
    "connection",
    "keep-alive",
    "upgrade",
    "content-type",
];

/// DNS-over-HTTPS forwarder with a pooled client shared by all requests.
pub struct HttpsForwarder {
    client: reqwest::Client,
    forward_client_ip: bool,
    relay_response_headers: bool,
    scheme: &'static str,
}

impl HttpsForwarder {
    pub fn new(timeout: Duration) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(timeout)
            .pool_max_idle_per_host(4)
            .build()
            .map_err(|e| DomainError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            forward_client_ip: true,
            relay_response_headers: false,
            scheme: "https",
        })
    }

    pub fn with_client_ip_forwarding(mut self, enabled: bool) -> Self {
        self.forward_client_ip = enabled;
        self
    }

    pub fn with_response_headers(mut self, enabled: bool) -> Self {
        self.relay_response_headers = enabled;
        self
    }

    /// Overrides the URL scheme, e.g. `http` for a plaintext loopback mock.
    pub fn with_scheme(mut self, scheme: &'static str) -> Self {
        self.scheme = scheme;
        self
    }

    pub fn url(&self, host: &str, path: &str) -> String {
        format!("{}://{}/{}", self.scheme, host, path)
    }

    fn relayed_headers(&self, headers: &HeaderMap) -> Vec<(String, String)> {
        if !self.relay_response_headers {
            return Vec::new();
        }
        headers
            .iter()
            .filter(|(name, _)| !is_skipped_header(name))
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect()
    }
}

fn is_skipped_header(name: &HeaderName) -> bool {
    SKIPPED_RESPONSE_HEADERS.contains(&name.as_str())
}

fn map_reqwest_error(url: &str, err: reqwest::Error) -> DomainError {
    if err.is_timeout() {
        DomainError::TransportTimeout {
            server: url.to_string(),
        }
    } else {
        DomainError::UpstreamHttp {
            server: url.to_string(),
            message: err.to_string(),
        }
    }
}

#[async_trait]
impl DohForwarder for HttpsForwarder {
    async fn forward(&self, query: DohQuery) -> Result<UpstreamReply, DomainError> {
        let url = self.url(&query.host, &query.path);

        debug!(
            url = %url,
            message_len = query.message.len(),
            "Sending DoH query"
        );

        // Host comes from the URL authority, which is always `query.host`.
        let mut request = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, DNS_MESSAGE_CONTENT_TYPE)
            .header(ACCEPT, DNS_MESSAGE_CONTENT_TYPE)
            .body(query.message.bytes());

        if self.forward_client_ip {
            if let Some(forwarded_for) = query.forwarded_for.as_deref() {
                request = request.header(X_FORWARDED_FOR, forwarded_for);
            }
        }

        let response = request
            .send()
            .await
            .map_err(|e| map_reqwest_error(&url, e))?;

        let status = response.status().as_u16();
        let headers = self.relayed_headers(response.headers());

        debug!(url = %url, status, "DoH response headers received");

        let body = response
            .bytes_stream()
            .map(move |chunk| chunk.map_err(|e| map_reqwest_error(&url, e)))
            .boxed();

        Ok(UpstreamReply {
            status,
            headers,
            body,
        })
    }
}
