use doh_relay_api::AppState;
use doh_relay_application::use_cases::{RelayDnsQueryUseCase, ResolveUpstreamUseCase};
use doh_relay_domain::Config;
use doh_relay_infrastructure::dns::{FastRandSource, HttpsForwarder, UdpForwarder};
use std::sync::Arc;
use tracing::info;

pub struct RelayServices {
    pub relay: Arc<RelayDnsQueryUseCase>,
}

impl RelayServices {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let registry = Arc::new(config.provider_registry()?);

        info!(
            do53_providers = registry.do53_count(),
            doh_providers = registry.doh_count(),
            default_provider = %config.relay.default_provider,
            "Provider registry loaded"
        );

        let resolver = Arc::new(
            ResolveUpstreamUseCase::new(registry, Arc::new(FastRandSource))
                .with_default_provider(config.relay.default_provider.as_str()),
        );

        let do53 = Arc::new(UdpForwarder::new(config.relay.do53_timeout()));
        let doh = Arc::new(
            HttpsForwarder::new(config.relay.doh_timeout())?
                .with_client_ip_forwarding(config.relay.forward_client_ip)
                .with_response_headers(config.relay.relay_response_headers),
        );

        let relay = Arc::new(RelayDnsQueryUseCase::new(resolver, do53, doh));

        Ok(Self { relay })
    }

    pub fn app_state(&self, config: &Config) -> AppState {
        AppState {
            relay: self.relay.clone(),
            max_body_bytes: config.server.max_body_bytes,
        }
    }
}
