use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Route root; the selector is whatever follows it in the request path.
    #[serde(default = "default_mount_path")]
    pub mount_path: String,

    /// Upper bound on POST bodies. Larger requests are answered with 413.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
            mount_path: default_mount_path(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_mount_path() -> String {
    "/".to_string()
}

fn default_max_body_bytes() -> usize {
    crate::dns_message::MAX_DNS_MESSAGE_SIZE
}
