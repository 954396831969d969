use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use doh_relay_domain::DomainError;

/// Turns relay failures into bodiless HTTP responses.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            DomainError::DnsMessageTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            err if err.is_client_error() => StatusCode::BAD_REQUEST,
            err if err.is_upstream_error() => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.status().into_response()
    }
}
