//! Named upstream resolvers and the category groups drawn from them.
//!
//! Provider names and category keywords are part of the public URL surface:
//! `/cloudflare`, `/doh-quad9`, `/family` and so on must keep working.

use crate::config::ProvidersConfig;
use crate::DomainError;
use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::sync::Arc;

/// Prefix shared by every DoH provider name and DoH category keyword.
pub const DOH_PREFIX: &str = "doh-";

pub const DEFAULT_PROVIDER: &str = "google";

const BUILTIN_DO53: &[(&str, IpAddr)] = &[
    ("google", IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8))),
    (
        "google6",
        IpAddr::V6(Ipv6Addr::new(0x2001, 0x4860, 0x4860, 0, 0, 0, 0, 0x8888)),
    ),
    ("adguard", IpAddr::V4(Ipv4Addr::new(94, 140, 14, 14))),
    ("adguard-family", IpAddr::V4(Ipv4Addr::new(94, 140, 14, 15))),
    ("adguard-unrestricted", IpAddr::V4(Ipv4Addr::new(94, 140, 14, 140))),
    ("cleanbrowsing-family", IpAddr::V4(Ipv4Addr::new(185, 228, 168, 168))),
    ("cleanbrowsing-adult", IpAddr::V4(Ipv4Addr::new(185, 228, 168, 10))),
    ("cleanbrowsing-security", IpAddr::V4(Ipv4Addr::new(185, 228, 168, 9))),
    ("cloudflare", IpAddr::V4(Ipv4Addr::new(1, 1, 1, 1))),
    ("cloudflare-malware", IpAddr::V4(Ipv4Addr::new(1, 1, 1, 2))),
    ("cloudflare-adult", IpAddr::V4(Ipv4Addr::new(1, 1, 1, 3))),
    ("opendns", IpAddr::V4(Ipv4Addr::new(208, 67, 222, 222))),
    ("opendns-family", IpAddr::V4(Ipv4Addr::new(208, 67, 222, 123))),
    ("quad9", IpAddr::V4(Ipv4Addr::new(9, 9, 9, 9))),
    ("quad9-unrestricted", IpAddr::V4(Ipv4Addr::new(9, 9, 9, 10))),
    ("quad9-ecs", IpAddr::V4(Ipv4Addr::new(9, 9, 9, 11))),
];

const BUILTIN_DOH: &[(&str, &str)] = &[
    ("doh-google", "dns.google/dns-query"),
    ("doh-adguard", "dns.adguard.com/dns-query"),
    ("doh-adguard-family", "dns-family.adguard.com/dns-query"),
    ("doh-adguard-unrestricted", "dns-unfiltered.adguard.com/dns-query"),
    ("doh-cleanbrowsing-family", "doh.cleanbrowsing.org/doh/family-filter/"),
    ("doh-cleanbrowsing-adult", "doh.cleanbrowsing.org/doh/adult-filter/"),
    ("doh-cleanbrowsing-security", "doh.cleanbrowsing.org/doh/security-filter/"),
    ("doh-cloudflare", "dns.cloudflare.com/dns-query"),
    ("doh-cloudflare-malware", "security.cloudflare-dns.com/dns-query"),
    ("doh-cloudflare-adult", "family.cloudflare-dns.com/dns-query"),
    ("doh-opendns", "doh.opendns.com/dns-query"),
    ("doh-opendns-family", "doh.familyshield.opendns.com/dns-query"),
    ("doh-quad9", "dns.quad9.net/dns-query"),
    ("doh-quad9-unrestricted", "dns10.quad9.net/dns-query"),
    ("doh-quad9-ecs", "dns11.quad9.net/dns-query"),
];

const UNRESTRICTED: &[&str] = &["adguard-unrestricted", "cloudflare", "quad9-unrestricted", "google"];
const ANTI_MALWARE: &[&str] = &["adguard", "cleanbrowsing-security", "cloudflare-malware", "quad9"];
const FAMILY: &[&str] = &["adguard-family", "cleanbrowsing-family", "cloudflare-adult", "opendns-family"];

/// Policy groups resolved by a uniform random pick among their members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Unrestricted,
    Malware,
    Family,
}

impl Category {
    pub const ALL: [Category; 3] = [Self::Unrestricted, Self::Malware, Self::Family];

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "unrestricted" => Some(Self::Unrestricted),
            "malware" => Some(Self::Malware),
            "family" => Some(Self::Family),
            _ => None,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Unrestricted => "unrestricted",
            Self::Malware => "malware",
            Self::Family => "family",
        }
    }

    fn builtin_members(&self) -> &'static [&'static str] {
        match self {
            Self::Unrestricted => UNRESTRICTED,
            Self::Malware => ANTI_MALWARE,
            Self::Family => FAMILY,
        }
    }
}

/// Read-only provider tables, built once at startup and shared behind `Arc`.
#[derive(Debug, Clone)]
pub struct ProviderRegistry {
    do53: HashMap<Arc<str>, IpAddr>,
    doh: HashMap<Arc<str>, Arc<str>>,
    groups: HashMap<Category, Vec<Arc<str>>>,
}

impl ProviderRegistry {
    pub fn builtin() -> Self {
        let do53 = BUILTIN_DO53
            .iter()
            .map(|(name, ip)| (Arc::from(*name), *ip))
            .collect();
        let doh = BUILTIN_DOH
            .iter()
            .map(|(name, host_path)| (Arc::from(*name), Arc::from(*host_path)))
            .collect();
        let groups = Category::ALL
            .iter()
            .map(|category| {
                let members = category
                    .builtin_members()
                    .iter()
                    .map(|name| Arc::from(*name))
                    .collect();
                (*category, members)
            })
            .collect();

        Self { do53, doh, groups }
    }

    /// Layers user-defined providers over the built-in tables.
    pub fn with_overrides(mut self, providers: &ProvidersConfig) -> Result<Self, DomainError> {
        for (name, ip) in &providers.do53 {
            let address: IpAddr = ip.parse().map_err(|_| {
                DomainError::ConfigError(format!(
                    "Do53 provider '{}' has an invalid IP address '{}'",
                    name, ip
                ))
            })?;
            self.do53.insert(Arc::from(name.as_str()), address);
        }

        for (name, host_path) in &providers.doh {
            if !name.starts_with(DOH_PREFIX) {
                return Err(DomainError::ConfigError(format!(
                    "DoH provider '{}' must start with '{}'",
                    name, DOH_PREFIX
                )));
            }
            let trimmed = host_path.trim_start_matches("https://");
            if trimmed.is_empty() || trimmed.starts_with('/') {
                return Err(DomainError::ConfigError(format!(
                    "DoH provider '{}' has no host",
                    name
                )));
            }
            self.doh
                .insert(Arc::from(name.as_str()), Arc::from(trimmed));
        }

        Ok(self)
    }

    pub fn do53(&self, name: &str) -> Option<IpAddr> {
        self.do53.get(name).copied()
    }

    /// `host/path` of a DoH provider, keyed by its `doh-` name.
    pub fn doh(&self, name: &str) -> Option<&str> {
        self.doh.get(name).map(|host_path| &**host_path)
    }

    pub fn group(&self, category: Category) -> &[Arc<str>] {
        self.groups
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn do53_count(&self) -> usize {
        self.do53.len()
    }

    pub fn doh_count(&self) -> usize {
        self.doh.len()
    }

    /// Every group member must exist both as a Do53 provider and, with the
    /// `doh-` prefix, as a DoH provider.
    pub fn validate(&self) -> Result<(), DomainError> {
        for category in Category::ALL {
            let members = self.group(category);
            if members.is_empty() {
                return Err(DomainError::ConfigError(format!(
                    "Category '{}' has no members",
                    category.keyword()
                )));
            }
            for member in members {
                if !self.do53.contains_key(member) {
                    return Err(DomainError::ConfigError(format!(
                        "Category '{}' references unknown Do53 provider '{}'",
                        category.keyword(),
                        member
                    )));
                }
                let doh_name = format!("{}{}", DOH_PREFIX, member);
                if !self.doh.contains_key(doh_name.as_str()) {
                    return Err(DomainError::ConfigError(format!(
                        "Category '{}' references unknown DoH provider '{}'",
                        category.keyword(),
                        doh_name
                    )));
                }
            }
        }
        Ok(())
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
