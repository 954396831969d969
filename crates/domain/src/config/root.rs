use serde::{Deserialize, Serialize};

use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::providers::ProvidersConfig;
use super::relay::RelayConfig;
use super::server::ServerConfig;
use crate::provider_registry::ProviderRegistry;

const LOCAL_CONFIG_PATH: &str = "doh-relay.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/doh-relay/config.toml";

/// Main configuration structure for the DoH relay
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// HTTP listener configuration (bind address, port, mount path)
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream relay behaviour
    #[serde(default)]
    pub relay: RelayConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// User-defined providers layered over the built-in registry
    #[serde(default)]
    pub providers: ProvidersConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. doh-relay.toml in current directory
    /// 3. /etc/doh-relay/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new(LOCAL_CONFIG_PATH).exists() {
            Self::from_file(LOCAL_CONFIG_PATH)?
        } else if std::path::Path::new(SYSTEM_CONFIG_PATH).exists() {
            Self::from_file(SYSTEM_CONFIG_PATH)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        config.normalize_mount_path();
        Ok(config)
    }

    /// Load configuration from a specific file
    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply command-line overrides to configuration
    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if overrides.no_forward_client_ip {
            self.relay.forward_client_ip = false;
        }
    }

    /// Mount paths always start with `/` and never end with one, except the
    /// root itself.
    fn normalize_mount_path(&mut self) {
        let trimmed = self.server.mount_path.trim().trim_matches('/');
        self.server.mount_path = format!("/{}", trimmed);
    }

    /// Builds the provider registry described by this configuration.
    pub fn provider_registry(&self) -> Result<ProviderRegistry, ConfigError> {
        let registry = ProviderRegistry::builtin()
            .with_overrides(&self.providers)
            .map_err(|e| ConfigError::Validation(e.to_string()))?;
        registry
            .validate()
            .map_err(|e| ConfigError::Validation(e.to_string()))?;
        Ok(registry)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("HTTP port cannot be 0".to_string()));
        }

        if self.server.max_body_bytes == 0 {
            return Err(ConfigError::Validation(
                "max_body_bytes cannot be 0".to_string(),
            ));
        }

        if self.relay.do53_timeout_ms == 0 || self.relay.doh_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "Upstream timeouts must be greater than 0".to_string(),
            ));
        }

        let registry = self.provider_registry()?;
        if registry.do53(&self.relay.default_provider).is_none() {
            return Err(ConfigError::Validation(format!(
                "Default provider '{}' is not a Do53 provider",
                self.relay.default_provider
            )));
        }

        Ok(())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub port: Option<u16>,
    pub bind_address: Option<String>,
    pub log_level: Option<String>,
    pub no_forward_client_ip: bool,
}
