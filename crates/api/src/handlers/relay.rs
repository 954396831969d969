use crate::{
    errors::ApiError,
    extract::{extract_dns_message, DohQueryParams},
    state::AppState,
};
use axum::{
    body::Body,
    extract::{Request, State},
    http::{
        header::{CACHE_CONTROL, CONTENT_TYPE},
        HeaderName, HeaderValue, StatusCode,
    },
    response::Response,
};
use doh_relay_application::use_cases::{RelayOutcome, RelayRequest};
use doh_relay_domain::{DomainError, Selector, UpstreamTarget, DNS_MESSAGE_CONTENT_TYPE};
use tracing::{debug, instrument, warn};

const X_FORWARDED_FOR: &str = "x-forwarded-for";

/// Single entry point for every method and path under the mount point.
///
/// The path below the mount point is the upstream selector. The reply status
/// and body come from the upstream; the content type is always
/// `application/dns-message`.
pub async fn relay_query(
    State(state): State<AppState>,
    request: Request,
) -> Result<Response, ApiError> {
    let selector = Selector::from_path(request.uri().path());
    relay(state, selector, request).await
}

/// A nested mount point followed by a bare `/`, e.g. `/relay/`. Nothing
/// follows the mount point, so the default provider is used.
pub async fn relay_mount_root(
    State(state): State<AppState>,
    request: Request,
) -> Result<Response, ApiError> {
    relay(state, Selector::default(), request).await
}

#[instrument(skip_all, name = "relay_query", fields(method = %request.method(), selector = %selector))]
async fn relay(
    state: AppState,
    selector: Selector,
    request: Request,
) -> Result<Response, ApiError> {
    let (parts, body) = request.into_parts();

    let params = DohQueryParams::from_uri(&parts.uri);

    let message = extract_dns_message(
        &parts.method,
        &parts.headers,
        &params,
        body,
        state.max_body_bytes,
    )
    .await
    .inspect_err(|e| warn!(selector = %selector, error = %e, "Rejected DoH request"))?;

    let forwarded_for = parts
        .headers
        .get(X_FORWARDED_FOR)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    let outcome = state
        .relay
        .execute(RelayRequest {
            selector,
            message,
            forwarded_for,
        })
        .await?;

    build_response(outcome)
}

fn build_response(outcome: RelayOutcome) -> Result<Response, ApiError> {
    let RelayOutcome { upstream, reply } = outcome;

    let status = StatusCode::from_u16(reply.status).map_err(|e| {
        DomainError::UpstreamHttp {
            server: upstream.target.to_string(),
            message: e.to_string(),
        }
    })?;

    let mut builder = Response::builder().status(status);

    for (name, value) in &reply.headers {
        match (
            HeaderName::try_from(name.as_str()),
            HeaderValue::try_from(value.as_str()),
        ) {
            (Ok(name), Ok(value)) => builder = builder.header(name, value),
            _ => debug!(header = %name, "Dropping unrelayable upstream header"),
        }
    }

    builder = builder.header(CONTENT_TYPE, DNS_MESSAGE_CONTENT_TYPE);
    if matches!(upstream.target, UpstreamTarget::Do53 { .. }) {
        builder = builder.header(CACHE_CONTROL, "no-store");
    }

    builder
        .body(Body::from_stream(reply.body))
        .map_err(|e| {
            ApiError(DomainError::UpstreamHttp {
                server: upstream.target.to_string(),
                message: e.to_string(),
            })
        })
}
