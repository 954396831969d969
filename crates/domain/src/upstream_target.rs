use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

pub const DO53_PORT: u16 = 53;

/// Concrete upstream a single request is relayed to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UpstreamTarget {
    /// Classic DNS over UDP port 53.
    Do53 { address: IpAddr },
    /// DNS-over-HTTPS endpoint at `https://{host}/{path}`.
    DoH { host: Arc<str>, path: Arc<str> },
}

impl UpstreamTarget {
    pub fn do53(address: IpAddr) -> Self {
        Self::Do53 { address }
    }

    pub fn doh(host: impl Into<Arc<str>>, path: impl Into<Arc<str>>) -> Self {
        Self::DoH {
            host: host.into(),
            path: path.into(),
        }
    }

    /// Splits `host/path` on the first `/`. The path may be empty, meaning the
    /// resolver root. A leading `/` does not count as a separator.
    pub fn doh_from_host_path(host_path: &str) -> Self {
        match host_path.split_once('/') {
            Some((host, path)) if !host.is_empty() => Self::doh(host, path),
            _ => Self::doh(host_path, ""),
        }
    }

    pub fn protocol_name(&self) -> &'static str {
        match self {
            Self::Do53 { .. } => "DO53",
            Self::DoH { .. } => "DOH",
        }
    }
}

impl fmt::Display for UpstreamTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Do53 { address } => write!(f, "udp://{}", SocketAddr::new(*address, DO53_PORT)),
            Self::DoH { host, path } => write!(f, "https://{}/{}", host, path),
        }
    }
}

/// Outcome of resolving a selector: the target plus the registry entry it
/// came from, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedUpstream {
    pub target: UpstreamTarget,
    pub provider: Option<Arc<str>>,
}

impl ResolvedUpstream {
    pub fn literal(target: UpstreamTarget) -> Self {
        Self {
            target,
            provider: None,
        }
    }

    pub fn from_provider(target: UpstreamTarget, provider: impl Into<Arc<str>>) -> Self {
        Self {
            target,
            provider: Some(provider.into()),
        }
    }
}
