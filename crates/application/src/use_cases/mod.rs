pub mod relay_dns_query;
pub mod resolve_upstream;

// Re-export use cases
pub use relay_dns_query::{RelayDnsQueryUseCase, RelayOutcome, RelayRequest};
pub use resolve_upstream::ResolveUpstreamUseCase;
