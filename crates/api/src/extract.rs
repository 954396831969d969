//! Pulls the DNS message out of an RFC 8484 request.
//!
//! A POST with `Content-Type: application/dns-message` carries the message as
//! its body. Otherwise a `dns` query parameter carries it base64url-encoded
//! without padding. A request with neither has no message, which is distinct
//! from an empty one.

use axum::{
    body::Body,
    extract::Query,
    http::{header::CONTENT_TYPE, HeaderMap, Method, Uri},
};
use doh_relay_domain::dns_message::is_dns_message_content_type;
use doh_relay_domain::{DnsMessage, DomainError};
use http_body_util::LengthLimitError;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct DohQueryParams {
    pub dns: Option<String>,
}

impl DohQueryParams {
    /// Malformed query strings count as carrying no parameters.
    pub fn from_uri(uri: &Uri) -> Self {
        Query::<Self>::try_from_uri(uri)
            .map(|Query(params)| params)
            .unwrap_or_default()
    }
}

pub fn is_dns_message_post(method: &Method, headers: &HeaderMap) -> bool {
    method == Method::POST
        && headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(is_dns_message_content_type)
            .unwrap_or(false)
}

pub async fn extract_dns_message(
    method: &Method,
    headers: &HeaderMap,
    params: &DohQueryParams,
    body: Body,
    limit: usize,
) -> Result<Option<DnsMessage>, DomainError> {
    if is_dns_message_post(method, headers) {
        let bytes = axum::body::to_bytes(body, limit).await.map_err(|e| {
            let source = e.into_inner();
            if source.downcast_ref::<LengthLimitError>().is_some() {
                DomainError::DnsMessageTooLarge(limit)
            } else {
                DomainError::RequestBody(source.to_string())
            }
        })?;
        return Ok(Some(DnsMessage::from(bytes)));
    }

    params
        .dns
        .as_deref()
        .map(DnsMessage::from_base64url)
        .transpose()
}
