use doh_relay_application::use_cases::RelayDnsQueryUseCase;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<RelayDnsQueryUseCase>,
    /// Cap on POST bodies read by the datagram extractor.
    pub max_body_bytes: usize,
}
