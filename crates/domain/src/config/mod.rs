pub mod errors;
pub mod logging;
pub mod providers;
pub mod relay;
pub mod root;
pub mod server;

pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use providers::ProvidersConfig;
pub use relay::RelayConfig;
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
