use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("No DNS message in request")]
    MissingDnsMessage,

    #[error("Invalid base64url DNS message: {0}")]
    InvalidDnsMessageEncoding(String),

    #[error("DNS message exceeds {0} bytes")]
    DnsMessageTooLarge(usize),

    #[error("Failed to read request body: {0}")]
    RequestBody(String),

    #[error("Transport timeout connecting to {server}")]
    TransportTimeout { server: String },

    #[error("Transport connection refused by {server}")]
    TransportConnectionRefused { server: String },

    #[error("Transport connection reset by {server}")]
    TransportConnectionReset { server: String },

    #[error("I/O error talking to {server}: {message}")]
    UpstreamIo { server: String, message: String },

    #[error("HTTP error talking to {server}: {message}")]
    UpstreamHttp { server: String, message: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl DomainError {
    /// Failures caused by what the caller sent. No upstream is contacted.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::MissingDnsMessage
                | Self::InvalidDnsMessageEncoding(_)
                | Self::DnsMessageTooLarge(_)
                | Self::RequestBody(_)
        )
    }

    pub fn is_upstream_error(&self) -> bool {
        matches!(
            self,
            Self::TransportTimeout { .. }
                | Self::TransportConnectionRefused { .. }
                | Self::TransportConnectionReset { .. }
                | Self::UpstreamIo { .. }
                | Self::UpstreamHttp { .. }
        )
    }

    /// Maps a socket error to the matching transport variant.
    pub fn from_io(server: impl Into<String>, err: &std::io::Error) -> Self {
        let server = server.into();
        match err.kind() {
            std::io::ErrorKind::TimedOut => Self::TransportTimeout { server },
            std::io::ErrorKind::ConnectionRefused => Self::TransportConnectionRefused { server },
            std::io::ErrorKind::ConnectionReset => Self::TransportConnectionReset { server },
            _ => Self::UpstreamIo {
                server,
                message: err.to_string(),
            },
        }
    }
}
