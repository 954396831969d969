//! DoH Relay Domain Layer
pub mod config;
pub mod dns_message;
pub mod errors;
pub mod provider_registry;
pub mod selector;
pub mod upstream_target;

pub use config::{CliOverrides, Config};
pub use dns_message::{DnsMessage, DNS_MESSAGE_CONTENT_TYPE};
pub use errors::DomainError;
pub use provider_registry::{Category, ProviderRegistry};
pub use selector::Selector;
pub use upstream_target::{ResolvedUpstream, UpstreamTarget};
