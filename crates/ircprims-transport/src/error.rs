use std::time::Duration;

/// Errors that can occur while establishing a server connection.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The server address could not be parsed.
    #[error("invalid server address '{addr}': {reason}")]
    InvalidAddress { addr: String, reason: String },

    /// The host is not usable as a TLS server name.
    #[error("invalid TLS server name '{0}'")]
    InvalidServerName(String),

    /// Failed to connect to the specified address.
    #[error("failed to connect to {addr}: {source}")]
    Connect {
        addr: String,
        source: std::io::Error,
    },

    /// The TLS client configuration could not be built.
    #[error("TLS configuration error: {0}")]
    Tls(#[from] rustls::Error),

    /// The TLS handshake with the server failed.
    #[error("TLS handshake with {addr} failed: {source}")]
    Handshake {
        addr: String,
        source: std::io::Error,
    },

    /// Connecting did not finish in time.
    #[error("connect timed out after {0:?}")]
    Timeout(Duration),

    /// An I/O error occurred on the transport stream.
    #[error("transport I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TransportError>;
