use crate::ports::RandomSource;
use doh_relay_domain::provider_registry::{DEFAULT_PROVIDER, DOH_PREFIX};
use doh_relay_domain::{Category, ProviderRegistry, ResolvedUpstream, Selector, UpstreamTarget};
use std::net::{IpAddr, Ipv6Addr};
use std::sync::Arc;
use tracing::debug;

const NEXTDNS_PREFIX: &str = "nextdns";
const NEXTDNS_DOH_HOST: &str = "dns.nextdns.io";
/// Reserved NextDNS anycast prefix; the configuration id fills the low groups.
const NEXTDNS_IPV6_PREFIX: &str = "2a07:a8c0::";
const NEXTDNS_TAIL_LEN: usize = 4;

/// Turns a selector into exactly one upstream target.
///
/// Do53 rules are tried first, in order: empty selector, literal IP,
/// NextDNS configuration id, Do53 provider name, category keyword. Anything
/// left over is a DoH instruction: DoH category, DoH provider name, NextDNS
/// path, and finally a literal `host/path`.
pub struct ResolveUpstreamUseCase {
    registry: Arc<ProviderRegistry>,
    random: Arc<dyn RandomSource>,
    default_provider: Arc<str>,
}

impl ResolveUpstreamUseCase {
    pub fn new(registry: Arc<ProviderRegistry>, random: Arc<dyn RandomSource>) -> Self {
        Self {
            registry,
            random,
            default_provider: Arc::from(DEFAULT_PROVIDER),
        }
    }

    pub fn with_default_provider(mut self, name: impl Into<Arc<str>>) -> Self {
        self.default_provider = name.into();
        self
    }

    pub fn execute(&self, selector: &Selector) -> ResolvedUpstream {
        let raw = selector.as_str();
        let resolved = self
            .resolve_do53(raw)
            .unwrap_or_else(|| self.resolve_doh(raw));

        debug!(
            selector = %selector,
            target = %resolved.target,
            provider = resolved.provider.as_deref().unwrap_or("-"),
            "Upstream resolved"
        );

        resolved
    }

    fn resolve_do53(&self, selector: &str) -> Option<ResolvedUpstream> {
        if selector.is_empty() {
            return self.do53_provider(&self.default_provider);
        }

        if let Ok(address) = selector.parse::<IpAddr>() {
            return Some(ResolvedUpstream::literal(UpstreamTarget::do53(address)));
        }

        if let Some(address) = nextdns_address(selector) {
            return Some(ResolvedUpstream::literal(UpstreamTarget::do53(
                IpAddr::V6(address),
            )));
        }

        if let Some(resolved) = self.do53_provider(selector) {
            return Some(resolved);
        }

        let category = Category::from_keyword(selector)?;
        let member = self.pick_member(category)?;
        self.do53_provider(&member)
    }

    fn resolve_doh(&self, selector: &str) -> ResolvedUpstream {
        if let Some(category) = selector
            .strip_prefix(DOH_PREFIX)
            .and_then(Category::from_keyword)
        {
            let picked = self
                .pick_member(category)
                .and_then(|member| self.doh_provider(&format!("{}{}", DOH_PREFIX, member)));
            if let Some(resolved) = picked {
                return resolved;
            }
        }

        if let Some(resolved) = self.doh_provider(selector) {
            return resolved;
        }

        if let Some(rest) = selector.strip_prefix(NEXTDNS_PREFIX) {
            let path = rest
                .strip_prefix('/')
                .or_else(|| rest.strip_prefix('-'))
                .unwrap_or(rest);
            return ResolvedUpstream::literal(UpstreamTarget::doh(NEXTDNS_DOH_HOST, path));
        }

        ResolvedUpstream::literal(UpstreamTarget::doh_from_host_path(selector))
    }

    fn do53_provider(&self, name: &str) -> Option<ResolvedUpstream> {
        self.registry.do53(name).map(|address| {
            ResolvedUpstream::from_provider(UpstreamTarget::do53(address), name)
        })
    }

    fn doh_provider(&self, name: &str) -> Option<ResolvedUpstream> {
        self.registry.doh(name).map(|host_path| {
            ResolvedUpstream::from_provider(UpstreamTarget::doh_from_host_path(host_path), name)
        })
    }

    fn pick_member(&self, category: Category) -> Option<Arc<str>> {
        let members = self.registry.group(category);
        if members.is_empty() {
            return None;
        }
        let index = self.random.pick_index(members.len());
        members.get(index).cloned()
    }
}

/// `nextdns-<id>` (or `nextdns<id>`) to NextDNS's anycast IPv6 address.
///
/// The last four hex digits of the id form the final group and the rest the
/// group before it: `abc1234d` becomes `2a07:a8c0::abc1:234d`. Ids that are
/// not hex, shorter than four digits, or too long to fit return `None`.
pub fn nextdns_address(selector: &str) -> Option<Ipv6Addr> {
    let rest = selector.strip_prefix(NEXTDNS_PREFIX)?;
    let config_id = rest.strip_prefix('-').unwrap_or(rest);

    if config_id.len() < NEXTDNS_TAIL_LEN || !config_id.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let (head, tail) = config_id.split_at(config_id.len() - NEXTDNS_TAIL_LEN);
    let text = if head.is_empty() {
        format!("{}{}", NEXTDNS_IPV6_PREFIX, tail)
    } else {
        format!("{}{}:{}", NEXTDNS_IPV6_PREFIX, head, tail)
    };
    text.parse().ok()
}
