use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RelayConfig {
    /// Do53 provider used for the empty selector.
    #[serde(default = "default_provider")]
    pub default_provider: String,

    #[serde(default = "default_do53_timeout_ms")]
    pub do53_timeout_ms: u64,

    #[serde(default = "default_doh_timeout_ms")]
    pub doh_timeout_ms: u64,

    /// Pass the caller's `x-forwarded-for` header to DoH upstreams so they can
    /// apply client-subnet policy.
    #[serde(default = "default_true")]
    pub forward_client_ip: bool,

    /// Relay upstream DoH response headers (minus hop-by-hop framing headers)
    /// instead of only status and body.
    #[serde(default)]
    pub relay_response_headers: bool,
}

impl RelayConfig {
    pub fn do53_timeout(&self) -> Duration {
        Duration::from_millis(self.do53_timeout_ms)
    }

    pub fn doh_timeout(&self) -> Duration {
        Duration::from_millis(self.doh_timeout_ms)
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            default_provider: default_provider(),
            do53_timeout_ms: default_do53_timeout_ms(),
            doh_timeout_ms: default_doh_timeout_ms(),
            forward_client_ip: true,
            relay_response_headers: false,
        }
    }
}

fn default_provider() -> String {
    crate::provider_registry::DEFAULT_PROVIDER.to_string()
}

fn default_do53_timeout_ms() -> u64 {
    3_000
}

fn default_doh_timeout_ms() -> u64 {
    10_000
}

fn default_true() -> bool {
    true
}
