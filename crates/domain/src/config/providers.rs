use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Extra providers layered over the built-in registry.
///
/// ```toml
/// [providers.do53]
/// office = "10.0.0.53"
///
/// [providers.doh]
/// doh-office = "dns.office.example/dns-query"
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub do53: BTreeMap<String, String>,

    #[serde(default)]
    pub doh: BTreeMap<String, String>,
}

impl ProvidersConfig {
    pub fn is_empty(&self) -> bool {
        self.do53.is_empty() && self.doh.is_empty()
    }
}
